//! Builder API for declaring flows.
//!
//! Flows are declared once, validated eagerly and frozen into an immutable
//! [`FlowDefinition`](crate::engine::FlowDefinition). States double as
//! views and events double as actions:
//!
//! ```rust
//! use flowstate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};
//!
//! let flow = FlowBuilder::new("forms")
//!     .initial_state("welcome")
//!     .state("what_is_your_favorite_day")
//!     .state("favorite_day")
//!     .state("goodbye")
//!     .event(EventBuilder::new("ask").transition(
//!         TransitionBuilder::new().from("welcome").to("what_is_your_favorite_day"),
//!     ))
//!     .event(EventBuilder::new("submit")
//!         .when("valid?")
//!         .transition(TransitionBuilder::new()
//!             .from("what_is_your_favorite_day")
//!             .to("favorite_day")
//!             .when("favorite?"))
//!         .transition(TransitionBuilder::new()
//!             .from("what_is_your_favorite_day")
//!             .to("goodbye")))
//!     .event(EventBuilder::new("finish").transition(TransitionBuilder::new().to("goodbye")))
//!     .state_guard("valid?", "valid")
//!     .guard("favorite?", |ctx| ctx.state().int("favorite_day") == Some(3))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(flow.events().len(), 3);
//! ```

pub mod error;
pub mod flow;
pub mod transition;

pub use error::{ConfigError, ConfigErrors};
pub use flow::FlowBuilder;
pub use transition::{EventBuilder, TransitionBuilder};
