//! Simulation engine tests: the arithmetic of a single day, the event
//! table, and the bounds every outcome must respect.

use empire_core::{
    config::EngineConfig,
    engine::advance_day,
    event::EventKind,
    rng::{GameRng, RandomSource, ScriptedRandom},
    startup::ProductPrice,
    state::GameState,
};

fn price(p: f64) -> ProductPrice {
    ProductPrice::new(p).expect("positive price")
}

fn fresh() -> GameState {
    GameState::initial(1_000_000)
}

#[test]
fn zero_draws_give_a_reproducible_successor() {
    let config = EngineConfig::default();
    let state = fresh();

    let mut rng_a = ScriptedRandom::constant(0.0);
    let mut rng_b = ScriptedRandom::constant(0.0);
    let a = advance_day(&state, price(100.0), &config, &mut rng_a);
    let b = advance_day(&state, price(100.0), &config, &mut rng_b);
    assert_eq!(a, b);

    // Minimum base revenue 5000 at 50% satisfaction, no event.
    assert_eq!(a.daily_revenue, 2_500);
    assert_eq!(a.daily_expenses, 7_000);
    assert!(a.event.is_none());
    assert!(a.notification().is_none());
    assert_eq!(
        a.state,
        GameState {
            day: 2,
            cash: 995_500,
            employees: 1,
            inventory: 0,
            revenue: 2_500,
            expenses: 7_000,
            customer_satisfaction: 50,
            employee_morale: 70,
        }
    );
    // Revenue draw + event-chance draw; no selection draw without an event.
    assert_eq!(rng_a.draws(), 2);
}

#[test]
fn three_employees_cost_exactly_eleven_thousand() {
    let config = EngineConfig::default();
    let state = GameState {
        employees: 3,
        ..fresh()
    };
    let mut rng = GameRng::new(0x5EED);
    for _ in 0..500 {
        let out = advance_day(&state, price(100.0), &config, &mut rng);
        assert_eq!(out.daily_expenses, 11_000);
        assert_eq!(out.state.expenses, 11_000);
    }
}

#[test]
fn zero_satisfaction_earns_nothing() {
    let config = EngineConfig::default();
    let state = GameState {
        customer_satisfaction: 0,
        ..fresh()
    };
    let mut rng = GameRng::new(99);
    for _ in 0..200 {
        let out = advance_day(&state, price(100.0), &config, &mut rng);
        assert_eq!(out.daily_revenue, 0);
        assert_eq!(out.state.cash, state.cash - out.daily_expenses);
    }
}

#[test]
fn every_outcome_respects_the_bounds() {
    let config = EngineConfig {
        // More events means more clamping to exercise.
        event_probability: 0.5,
        ..EngineConfig::default()
    };
    let mut rng = GameRng::new(0xDEAD_BEEF);
    let mut state = GameState {
        inventory: 5_000,
        ..fresh()
    };

    for _ in 0..5_000 {
        let out = advance_day(&state, price(10.0), &config, &mut rng);
        let sat = state.customer_satisfaction as i64;

        assert_eq!(out.state.day, state.day + 1);
        assert!(out.state.customer_satisfaction <= 100);
        assert!(out.state.employee_morale <= 100);
        assert!(out.daily_revenue >= 0);
        assert!(out.daily_revenue <= 14_999 * sat / 100);
        assert_eq!(out.state.revenue, state.revenue + out.daily_revenue);
        assert_eq!(out.state.expenses, state.expenses + out.daily_expenses);
        assert!(out.state.inventory <= state.inventory);

        state = out.state;
    }
}

#[test]
fn event_fires_and_applies_deltas() {
    let config = EngineConfig::default();
    // revenue draw, chance draw in the top 10%, selection -> index 1
    let mut rng = ScriptedRandom::new(vec![0.0, 0.95, 0.3]);
    let out = advance_day(&fresh(), price(100.0), &config, &mut rng);

    let event = out.event.as_ref().expect("event should fire");
    assert_eq!(event.kind, EventKind::RaveReview);
    assert_eq!(out.state.customer_satisfaction, 58);
    assert_eq!(out.state.employee_morale, 73);

    let n = out.notification().expect("event notification");
    assert_eq!(n.title, "Day 2 Event");
    assert_eq!(n.description, "Great customer review received!");
}

#[test]
fn event_deltas_are_clamped() {
    let config = EngineConfig::default();

    let high = GameState {
        customer_satisfaction: 98,
        employee_morale: 99,
        ..fresh()
    };
    let mut rng = ScriptedRandom::new(vec![0.0, 0.99, 0.3]);
    let out = advance_day(&high, price(100.0), &config, &mut rng);
    assert_eq!(out.state.customer_satisfaction, 100);
    assert_eq!(out.state.employee_morale, 100);

    let low = GameState {
        customer_satisfaction: 2,
        employee_morale: 1,
        ..fresh()
    };
    // selection 0.8 -> competitor launch (-3, -2)
    let mut rng = ScriptedRandom::new(vec![0.0, 0.99, 0.8]);
    let out = advance_day(&low, price(100.0), &config, &mut rng);
    assert_eq!(out.event.as_ref().map(|e| e.kind), Some(EventKind::CompetitorLaunch));
    assert_eq!(out.state.customer_satisfaction, 0);
    assert_eq!(out.state.employee_morale, 0);
}

#[test]
fn inventory_depletes_by_units_sold_and_never_goes_negative() {
    let config = EngineConfig::default();
    let stocked = GameState {
        inventory: 100,
        customer_satisfaction: 100,
        ..fresh()
    };
    let mut rng = ScriptedRandom::constant(0.0);
    let out = advance_day(&stocked, price(100.0), &config, &mut rng);
    // 5000 revenue / 100 per unit
    assert_eq!(out.state.inventory, 50);

    let thin = GameState {
        inventory: 10,
        ..stocked
    };
    let mut rng = ScriptedRandom::constant(0.0);
    let out = advance_day(&thin, price(100.0), &config, &mut rng);
    assert_eq!(out.state.inventory, 0);
}

#[test]
fn event_probability_is_configurable() {
    let never = EngineConfig {
        event_probability: 0.0,
        ..EngineConfig::default()
    };
    let always = EngineConfig {
        event_probability: 1.0,
        ..EngineConfig::default()
    };

    let mut rng = ScriptedRandom::constant(0.999);
    for _ in 0..50 {
        assert!(advance_day(&fresh(), price(100.0), &never, &mut rng).event.is_none());
    }
    let mut rng = ScriptedRandom::constant(0.0);
    for _ in 0..50 {
        assert!(advance_day(&fresh(), price(100.0), &always, &mut rng).event.is_some());
    }
}

#[test]
fn default_event_rate_is_about_ten_percent() {
    let config = EngineConfig::default();
    let mut rng = GameRng::new(2024);
    let days = 20_000;
    let fired = (0..days)
        .filter(|_| advance_day(&fresh(), price(100.0), &config, &mut rng).event.is_some())
        .count();
    assert!(
        (1_600..=2_400).contains(&fired),
        "expected ~2000 events in {days} days, got {fired}"
    );
}

#[test]
fn all_four_events_are_reachable() {
    let config = EngineConfig::default();
    let picks = [0.0, 0.3, 0.6, 0.9];
    let kinds: Vec<EventKind> = picks
        .iter()
        .map(|&pick| {
            let mut rng = ScriptedRandom::new(vec![0.0, 0.95, pick]);
            advance_day(&fresh(), price(100.0), &config, &mut rng)
                .event
                .expect("event")
                .kind
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Complaint,
            EventKind::RaveReview,
            EventKind::TrainingCompleted,
            EventKind::CompetitorLaunch,
        ]
    );
}

#[test]
fn engine_accepts_a_borrowed_trait_object() {
    let config = EngineConfig::default();
    let mut inner = ScriptedRandom::constant(0.0);
    let rng: &mut dyn RandomSource = &mut inner;
    let out = advance_day(&fresh(), price(100.0), &config, rng);
    assert_eq!(out.state.day, 2);
}

#[test]
fn oversized_config_is_rejected_and_never_panics_the_engine() {
    use empire_core::config::GameConfig;

    let json = r#"{ "engine": { "revenue_floor": 9223372036854770000 } }"#;
    assert!(GameConfig::from_json(json).is_err());

    // Built in code, skipping validation: the day still completes.
    let config = EngineConfig {
        revenue_floor: i64::MAX - 5,
        cost_per_employee: i64::MAX,
        ..EngineConfig::default()
    };
    let state = GameState {
        customer_satisfaction: 100,
        employees: 3,
        ..fresh()
    };
    let mut rng = ScriptedRandom::constant(0.5);
    let out = advance_day(&state, price(100.0), &config, &mut rng);
    assert_eq!(out.state.day, 2);
    assert!(out.daily_revenue >= 0);
    assert_eq!(out.daily_expenses, i64::MAX);
}
