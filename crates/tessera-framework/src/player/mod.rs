//! Built-in player placeholders.
//!
//! [`register`] installs the whole table into a [`Dispatcher`]:
//!
//! - offline-capable keys (profile and join data)
//! - live-only keys (position, stats, items)
//! - dynamic prefixes (`ping_<name>`, `has_permission_<node>`, ...)

mod dynamic;
mod live;
mod offline;

use crate::context::ResolveContext;
use crate::dispatcher::Dispatcher;
use tessera_core::foundation::render_float;
use tessera_core::{Location, Property, Subject};

/// Registers every built-in player placeholder.
pub fn register(dispatcher: &mut Dispatcher) {
    offline::register(dispatcher);
    live::register(dispatcher);
    dynamic::register(dispatcher);
}

/// A dispatcher holding only the built-in player placeholders.
pub fn dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    register(&mut dispatcher);
    dispatcher
}

// =============================================================================
// Rendering helpers
// =============================================================================

fn text(subject: &dyn Subject, property: Property) -> String {
    subject
        .property(property)
        .map(|v| v.render())
        .unwrap_or_default()
}

fn int(subject: &dyn Subject, property: Property) -> String {
    subject
        .property(property)
        .and_then(|v| v.as_i64())
        .unwrap_or(0)
        .to_string()
}

fn float(subject: &dyn Subject, property: Property) -> String {
    render_float(number(subject, property))
}

fn number(subject: &dyn Subject, property: Property) -> f64 {
    subject
        .property(property)
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn boolean(ctx: &ResolveContext, subject: &dyn Subject, property: Property) -> String {
    let value = subject
        .property(property)
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    ctx.settings().render_bool(value)
}

fn location(subject: &dyn Subject, property: Property) -> Option<Location> {
    subject
        .property(property)
        .and_then(|v| v.as_location().cloned())
}

/// Rounds half up, like the host's `round`.
fn round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round(19.5), 20);
        assert_eq!(round(19.49), 19);
        assert_eq!(round(-0.5), 0);
    }

    #[test]
    fn test_table_is_complete() {
        let d = dispatcher();
        for key in ["name", "first_join_date", "bed_world", "world_time_12", "armor_boots_data"] {
            assert!(d.static_keys().any(|k| k == key), "{key} missing");
        }
        assert_eq!(
            d.prefixes().collect::<Vec<_>>(),
            [
                "item_in_offhand_level_",
                "item_in_hand_level_",
                "has_permission_",
                "colored_ping_",
                "locale_",
                "ping_",
            ]
        );
    }
}
