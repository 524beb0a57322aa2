//! The simulation engine: one call, one day.
//!
//! ORDER OF A DAY (fixed, never reordered; the draw order is part of
//! replay determinism):
//!   1. Revenue draw      -> base revenue, scaled by satisfaction
//!   2. Expenses          -> per-employee wages + fixed overhead
//!   3. Books             -> day, cumulative revenue/expenses, cash
//!   4. Event-chance draw -> at most one event, metrics clamped
//!   5. Inventory         -> units sold at the product price, floored at 0
//!
//! The engine owns no state. It reads the previous day, returns the next
//! one, and leaves persistence and notification to the caller.

use crate::{
    config::EngineConfig,
    event::DayEvent,
    notify::Notification,
    rng::RandomSource,
    startup::ProductPrice,
    state::{GameState, METRIC_MAX, METRIC_MIN},
    types::Money,
};

/// The result of advancing one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOutcome {
    pub state: GameState,
    pub daily_revenue: Money,
    pub daily_expenses: Money,
    pub event: Option<DayEvent>,
}

impl DayOutcome {
    /// The notification for this day, if an event fired.
    pub fn notification(&self) -> Option<Notification> {
        self.event.as_ref().map(|e| {
            Notification::normal(format!("Day {} Event", self.state.day), e.message.clone())
        })
    }
}

/// Compute the next day's state.
pub fn advance_day<R: RandomSource + ?Sized>(
    state: &GameState,
    product_price: ProductPrice,
    config: &EngineConfig,
    rng: &mut R,
) -> DayOutcome {
    let mut next = state.clone();

    let base = base_revenue(rng.next_f64(), config);
    let revenue = daily_revenue(base, state.customer_satisfaction);
    let expenses = daily_expenses(state.employees, config);

    // Cumulative totals saturate instead of wrapping on very long runs.
    next.day = next.day.saturating_add(1);
    next.revenue = next.revenue.saturating_add(revenue);
    next.expenses = next.expenses.saturating_add(expenses);
    next.cash = next.cash.saturating_add(revenue.saturating_sub(expenses));

    let event = roll_event(rng, config);
    if let Some(e) = &event {
        next.customer_satisfaction = apply_delta(next.customer_satisfaction, e.satisfaction_delta);
        next.employee_morale = apply_delta(next.employee_morale, e.morale_delta);
    }

    next.inventory = next
        .inventory
        .saturating_sub(units_sold(revenue, product_price));

    log::debug!(
        "day={} revenue={revenue} expenses={expenses} cash={} sat={} morale={} event={:?}",
        next.day,
        next.cash,
        next.customer_satisfaction,
        next.employee_morale,
        event.as_ref().map(|e| e.kind),
    );

    DayOutcome {
        state: next,
        daily_revenue: revenue,
        daily_expenses: expenses,
        event,
    }
}

/// Map a unit draw onto [revenue_floor, revenue_floor + revenue_span).
pub fn base_revenue(draw: f64, config: &EngineConfig) -> Money {
    let offset = (draw * config.revenue_span as f64).floor() as Money;
    config
        .revenue_floor
        .saturating_add(offset.clamp(0, config.revenue_span.saturating_sub(1).max(0)))
}

/// Base revenue scaled by satisfaction percent, floored.
pub fn daily_revenue(base: Money, customer_satisfaction: u32) -> Money {
    base.saturating_mul(Money::from(customer_satisfaction.min(METRIC_MAX))) / 100
}

pub fn daily_expenses(employees: u32, config: &EngineConfig) -> Money {
    Money::from(employees)
        .saturating_mul(config.cost_per_employee)
        .saturating_add(config.fixed_overhead)
}

/// Whole units sold for the day's revenue.
pub fn units_sold(daily_revenue: Money, product_price: ProductPrice) -> u64 {
    if daily_revenue <= 0 {
        return 0;
    }
    (daily_revenue as f64 / product_price.get()).floor() as u64
}

/// The chance draw fires an event when it lands in the top
/// `event_probability` of [0, 1). Only then is the selection drawn.
fn roll_event<R: RandomSource + ?Sized>(rng: &mut R, config: &EngineConfig) -> Option<DayEvent> {
    let roll = rng.next_f64();
    if config.events.is_empty() || roll < 1.0 - config.event_probability {
        return None;
    }
    let idx = rng.next_index(config.events.len());
    Some(config.events[idx].clone())
}

fn apply_delta(metric: u32, delta: i32) -> u32 {
    (i64::from(metric) + i64::from(delta)).clamp(i64::from(METRIC_MIN), i64::from(METRIC_MAX))
        as u32
}
