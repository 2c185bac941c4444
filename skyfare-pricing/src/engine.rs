use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Deserialize;
use skyfare_core::{seat, Flight};

use crate::cabin;

/// Occupancy surcharge: applies while the remaining share of seats is
/// strictly below `below_percent` (0-100).
#[derive(Debug, Clone, Deserialize)]
pub struct OccupancyRule {
    pub below_percent: f64,
    pub surcharge: f64,
}

/// Urgency surcharge: applies while departure is strictly less than
/// `within_hours` away. Past departures never match.
#[derive(Debug, Clone, Deserialize)]
pub struct UrgencyRule {
    pub within_hours: f64,
    pub surcharge: f64,
}

/// Demand surcharge: applies when the uniform [0,1) draw is strictly
/// above `above_draw`.
#[derive(Debug, Clone, Deserialize)]
pub struct DemandRule {
    pub above_draw: f64,
    pub surcharge: f64,
}

/// The full surcharge schedule. Rules are evaluated in listing order,
/// every matching rule stacks, and each surcharge is a fraction of the
/// class-adjusted base fare.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_occupancy_rules")]
    pub occupancy: Vec<OccupancyRule>,
    #[serde(default = "default_urgency_rules")]
    pub urgency: Vec<UrgencyRule>,
    #[serde(default = "default_demand_rule")]
    pub demand: DemandRule,
    /// Modeled capacity when a flight carries no seat map at all. The
    /// upstream system hardcoded 6 here; it is configuration now.
    #[serde(default = "default_empty_seat_map_capacity")]
    pub empty_seat_map_capacity: u32,
}

fn default_occupancy_rules() -> Vec<OccupancyRule> {
    vec![
        OccupancyRule { below_percent: 50.0, surcharge: 0.20 },
        OccupancyRule { below_percent: 20.0, surcharge: 0.35 },
    ]
}

fn default_urgency_rules() -> Vec<UrgencyRule> {
    vec![
        UrgencyRule { within_hours: 48.0, surcharge: 0.15 },
        UrgencyRule { within_hours: 24.0, surcharge: 0.30 },
    ]
}

fn default_demand_rule() -> DemandRule {
    DemandRule { above_draw: 0.8, surcharge: 0.10 }
}

fn default_empty_seat_map_capacity() -> u32 {
    6
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            occupancy: default_occupancy_rules(),
            urgency: default_urgency_rules(),
            demand: default_demand_rule(),
            empty_seat_map_capacity: default_empty_seat_map_capacity(),
        }
    }
}

/// Everything a quote needs, captured from a flight at read time.
#[derive(Debug, Clone)]
pub struct QuoteInputs {
    pub base_price: i64,
    pub booked_seats: usize,
    pub total_seats: usize,
    /// Seat row driving the fare-class multiplier. Row 0 sits outside
    /// every cabin band, so flight-level quotes price at Economy.
    pub seat_row: i32,
    pub departure_time: DateTime<Utc>,
}

impl QuoteInputs {
    /// Inputs for quoting a specific seat on a flight.
    pub fn for_seat(flight: &Flight, seat_label: &str) -> Self {
        Self {
            base_price: flight.base_price,
            booked_seats: flight.booked_seat_count(),
            total_seats: flight.seats.len(),
            seat_row: seat::seat_row(seat_label),
            departure_time: flight.departure_time,
        }
    }

    /// Inputs for a flight-level quote (search listings), priced at the
    /// Economy multiplier.
    pub fn for_flight(flight: &Flight) -> Self {
        Self {
            base_price: flight.base_price,
            booked_seats: flight.booked_seat_count(),
            total_seats: flight.seats.len(),
            seat_row: 0,
            departure_time: flight.departure_time,
        }
    }
}

/// Dynamic pricing engine.
///
/// `quote` is a pure function of its arguments: the clock reading and the
/// random draw are parameters, so identical inputs always produce the
/// same integer price. [`PricingEngine::quote_now`] is the production
/// boundary that supplies both from ambient sources.
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Price a seat. Total over all numeric inputs: overbooked maps,
    /// past departures, and out-of-range draws all still quote.
    ///
    /// Rounds half-up (half away from zero; the price is non-negative).
    pub fn quote(&self, inputs: &QuoteInputs, now: DateTime<Utc>, draw: f64) -> i64 {
        let class = cabin::classify(inputs.seat_row);
        let base = inputs.base_price as f64 * class.multiplier();
        let mut price = base;

        let total = if inputs.total_seats == 0 {
            self.config.empty_seat_map_capacity as f64
        } else {
            inputs.total_seats as f64
        };
        let remaining_percent = (total - inputs.booked_seats as f64) / total * 100.0;
        for rule in &self.config.occupancy {
            if remaining_percent < rule.below_percent {
                price += base * rule.surcharge;
            }
        }

        let hours_out = (inputs.departure_time - now).num_seconds() as f64 / 3600.0;
        for rule in &self.config.urgency {
            if hours_out < rule.within_hours && hours_out > 0.0 {
                price += base * rule.surcharge;
            }
        }

        if draw > self.config.demand.above_draw {
            price += base * self.config.demand.surcharge;
        }

        price.round() as i64
    }

    /// Production entry point: reads the clock and draws demand here so
    /// the engine itself stays deterministic.
    pub fn quote_now(&self, inputs: &QuoteInputs) -> i64 {
        let draw: f64 = rand::thread_rng().gen();
        let price = self.quote(inputs, Utc::now(), draw);
        tracing::debug!(
            base_price = inputs.base_price,
            seat_row = inputs.seat_row,
            price,
            "quoted seat"
        );
        price
    }
}
