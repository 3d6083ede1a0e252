//! Tinct Widgets
//!
//! Widgets driven by explicit state rather than host lifecycle hooks:
//! every state transition runs a pure render function and notifies
//! observers with the new view.
//!
//! # Example
//!
//! ```rust
//! use tinct_widgets::switch::Switch;
//!
//! let mut switch = Switch::new();
//! switch.on_change(|change| println!("checked: {}", change.checked));
//!
//! switch.set_attribute("color", "secondary");
//! let change = switch.toggle().unwrap();
//! assert!(change.checked);
//! assert_eq!(switch.view().color, "secondary");
//! ```

pub mod switch;

pub use switch::{
    Switch, SwitchAttribute, SwitchChange, SwitchEvent, SwitchState, SwitchTransition, SwitchView,
};
