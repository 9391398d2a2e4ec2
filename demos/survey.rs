//! Survey Wizard Example
//!
//! A three-page survey driven one request at a time. Each request builds a
//! fresh controller; the only thing carried between requests is the store.
//!
//! Key concepts:
//! - `start` and `next` requests
//! - A pre-view hook that validates input and aborts
//! - Event-level and rule-level guards picking a branch
//! - `clear` restarting the flow
//!
//! Run with: RUST_LOG=flowstate=debug cargo run --example survey

use flowstate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};
use flowstate::engine::{FlowContext, FlowDefinition};
use flowstate::lifecycle::{FlowController, FlowRequest, RecordingRenderer};
use flowstate::store::{MemoryStore, StateStore};
use flowstate::FlowError;
use tracing_subscriber::EnvFilter;

fn survey() -> FlowDefinition {
    FlowBuilder::new("survey")
        .initial_state("welcome")
        .states(["what_is_your_favorite_day", "favorite_day", "goodbye"])
        .view("goodbye", "survey/goodbye")
        .event(
            EventBuilder::new("begin")
                .transition(TransitionBuilder::new().from("welcome").to("what_is_your_favorite_day")),
        )
        .event(
            EventBuilder::new("answer").when("valid?").transitions([
                TransitionBuilder::new()
                    .from("what_is_your_favorite_day")
                    .to("favorite_day")
                    .when("favorite?"),
                TransitionBuilder::new()
                    .from("what_is_your_favorite_day")
                    .to("goodbye"),
            ]),
        )
        .event(
            EventBuilder::new("finish")
                .transition(TransitionBuilder::new().from("favorite_day").to("goodbye")),
        )
        .state_guard("valid?", "valid")
        .guard("favorite?", |ctx| ctx.state().text("day") == Some("saturday"))
        .before_view("what_is_your_favorite_day", record_answer)
        .before_view("goodbye", |ctx| {
            let day = ctx.state().text("day").unwrap_or("no day").to_string();
            ctx.set("summary", format!("Thanks! You picked {day}."));
        })
        .build()
        .unwrap_or_else(|errors| panic!("survey definition is invalid: {errors}"))
}

fn record_answer(ctx: &mut FlowContext<'_>) {
    let Some(day) = ctx.params().get("day").and_then(|v| v.as_str()) else {
        return;
    };
    let day = day.trim().to_lowercase();
    if day.is_empty() {
        ctx.set("valid", false);
        ctx.set_status(400);
        ctx.abort();
        return;
    }
    ctx.set("day", day);
    ctx.set("valid", true);
}

fn main() -> Result<(), FlowError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Survey Wizard Example ===\n");

    let flow = survey();
    let mut store = MemoryStore::new(flow.name());
    let mut renderer = RecordingRenderer::new();

    let requests = [
        FlowRequest::new("start"),
        FlowRequest::new("next"),
        FlowRequest::new("answer").with_param("day", "  "),
        FlowRequest::new("answer").with_param("day", "Saturday"),
        FlowRequest::new("next"),
    ];

    for request in &requests {
        let outcome = FlowController::new(&flow, &mut store).handle(request, &mut renderer)?;
        println!(
            "{:>8} -> {:<28} status {} (fired: {}, aborted: {}, saved: {})",
            request.action,
            outcome.render.view,
            outcome.render.status,
            outcome.fired,
            outcome.aborted,
            outcome.saved,
        );
    }

    let state = store.load()?;
    println!(
        "\nFinal state: {}",
        state.current_state().map(|s| s.as_str()).unwrap_or("-")
    );
    if let Some(summary) = state.text("summary") {
        println!("{summary}");
    }

    // A clear restarts the wizard on the next request.
    let outcome = FlowController::new(&flow, &mut store)
        .handle(&FlowRequest::new("begin").with_param("clear", true), &mut renderer)?;
    println!("\nAfter clear: {}", outcome.render.view);

    Ok(())
}
