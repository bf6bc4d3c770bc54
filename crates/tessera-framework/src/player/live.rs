//! Placeholders that need a connected subject.

use super::{boolean, float, int, location, number, round, text};
use crate::calc::{ClockFormat, Direction, format_ticks, total_experience, xz_direction};
use crate::context::ResolveContext;
use crate::dispatcher::{Dispatcher, Liveness};
use tessera_core::accessor::ABSORPTION_SENTINEL;
use tessera_core::foundation::render_float;
use tessera_core::{Capability, ItemView, Location, Property, Slot, Subject};

const LIVE: Liveness = Liveness::Live;

pub(super) fn register(d: &mut Dispatcher) {
    register_profile(d);
    register_position(d);
    register_stats(d);
    register_timing(d);
    register_items(d);
}

fn register_profile(d: &mut Dispatcher) {
    d.add_static("displayname", LIVE, |_, s| text(s, Property::DisplayName));
    d.add_static("custom_name", LIVE, |_, s| {
        s.property(Property::CustomName)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| s.name().to_string())
    });
    d.add_static("locale", LIVE, |ctx, s| ctx.accessors().locale(s));
    d.add_static("gamemode", LIVE, |_, s| text(s, Property::GameMode));
    d.add_static("ip", LIVE, |_, s| text(s, Property::Address));
    d.add_static("allow_flight", LIVE, |ctx, s| {
        boolean(ctx, s, Property::AllowFlight)
    });
    d.add_static("can_pickup_items", LIVE, |ctx, s| {
        boolean(ctx, s, Property::CanPickupItems)
    });
    d.add_static("ping", LIVE, |ctx, s| ctx.accessors().ping(s).to_string());
    d.add_static("colored_ping", LIVE, |ctx, s| {
        ctx.rules().format(i64::from(ctx.accessors().ping(s)))
    });
}

fn register_position(d: &mut Dispatcher) {
    d.add_static("world", LIVE, |_, s| text(s, Property::World));
    d.add_static("world_type", LIVE, |_, s| {
        world_type(&text(s, Property::WorldEnvironment)).to_string()
    });
    d.add_static("x", LIVE, |_, s| here(s, |l| l.block_x().to_string()));
    d.add_static("y", LIVE, |_, s| here(s, |l| l.block_y().to_string()));
    d.add_static("z", LIVE, |_, s| here(s, |l| l.block_z().to_string()));
    d.add_static("yaw", LIVE, |_, s| {
        here(s, |l| render_float(f64::from(l.yaw)))
    });
    d.add_static("pitch", LIVE, |_, s| {
        here(s, |l| render_float(f64::from(l.pitch)))
    });
    d.add_static("direction", LIVE, |_, s| {
        here(s, |l| Direction::from_yaw(l.yaw).to_string())
    });
    d.add_static("direction_xz", LIVE, |_, s| {
        here(s, |l| xz_direction(l.yaw).to_string())
    });
    d.add_static("biome", LIVE, |_, s| text(s, Property::Biome));
    d.add_static("biome_capitalized", LIVE, |_, s| {
        capitalize(&text(s, Property::Biome))
    });
    d.add_static("light_level", LIVE, |_, s| int(s, Property::LightLevel));

    d.add_static("compass_x", LIVE, |_, s| compass(s, |l| l.block_x().to_string()));
    d.add_static("compass_y", LIVE, |_, s| compass(s, |l| l.block_y().to_string()));
    d.add_static("compass_z", LIVE, |_, s| compass(s, |l| l.block_z().to_string()));
    d.add_static("compass_world", LIVE, |_, s| {
        compass(s, |l| l.world_name().to_string())
    });
}

fn register_stats(d: &mut Dispatcher) {
    d.add_static("exp", LIVE, |_, s| float(s, Property::Exp));
    d.add_static("current_exp", LIVE, |_, s| {
        let level = s
            .property(Property::Level)
            .and_then(|v| v.as_i64())
            .and_then(|l| i32::try_from(l).ok())
            .unwrap_or(0);
        total_experience(level, number(s, Property::Exp) as f32).to_string()
    });
    d.add_static("total_exp", LIVE, |_, s| int(s, Property::TotalExperience));
    d.add_static("exp_to_level", LIVE, |_, s| int(s, Property::ExpToLevel));
    d.add_static("level", LIVE, |_, s| int(s, Property::Level));

    d.add_static("health", LIVE, |_, s| float(s, Property::Health));
    d.add_static("health_rounded", LIVE, |_, s| {
        round(number(s, Property::Health)).to_string()
    });
    d.add_static("health_scale", LIVE, |_, s| float(s, Property::HealthScale));
    d.add_static("max_health", LIVE, |ctx, s| {
        render_float(ctx.accessors().max_health(s))
    });
    d.add_static("max_health_rounded", LIVE, |ctx, s| {
        round(ctx.accessors().max_health(s)).to_string()
    });
    d.add_static("absorption", LIVE, |ctx, s| {
        let amount = ctx.accessors().absorption(s);
        if amount == ABSORPTION_SENTINEL {
            "-1".to_string()
        } else {
            render_float(amount)
        }
    });
    d.add_static("last_damage", LIVE, |_, s| float(s, Property::LastDamage));

    for (key, property) in [
        ("fly_speed", Property::FlySpeed),
        ("walk_speed", Property::WalkSpeed),
        ("saturation", Property::Saturation),
    ] {
        d.add_static(key, LIVE, move |_, s| float(s, property));
    }
    for (key, property) in [
        ("food_level", Property::FoodLevel),
        ("max_air", Property::MaximumAir),
        ("remaining_air", Property::RemainingAir),
        ("no_damage_ticks", Property::NoDamageTicks),
        ("max_no_damage_ticks", Property::MaximumNoDamageTicks),
    ] {
        d.add_static(key, LIVE, move |_, s| int(s, property));
    }
}

fn register_timing(d: &mut Dispatcher) {
    for (key, property) in [
        ("time", Property::PlayerTime),
        ("time_offset", Property::PlayerTimeOffset),
        ("sleep_ticks", Property::SleepTicks),
        ("ticks_lived", Property::TicksLived),
        ("world_time", Property::WorldTime),
        ("thunder_duration", Property::ThunderDuration),
        ("weather_duration", Property::WeatherDuration),
    ] {
        d.add_static(key, LIVE, move |_, s| int(s, property));
    }

    d.add_static("seconds_lived", LIVE, |_, s| {
        (ticks(s, Property::TicksLived) / 20).to_string()
    });
    d.add_static("minutes_lived", LIVE, |_, s| {
        (ticks(s, Property::TicksLived) / 20 / 60).to_string()
    });
    d.add_static("world_time_12", LIVE, |_, s| {
        format_ticks(ticks(s, Property::WorldTime), ClockFormat::TwelveHour)
    });
    d.add_static("world_time_24", LIVE, |_, s| {
        format_ticks(ticks(s, Property::WorldTime), ClockFormat::TwentyFourHour)
    });
}

fn register_items(d: &mut Dispatcher) {
    d.add_static("has_empty_slot", LIVE, |ctx, s| {
        let free = s.inventory().is_some_and(|inv| inv.has_empty_slot());
        ctx.settings().render_bool(free)
    });
    d.add_static("empty_slots", LIVE, |ctx, s| {
        let off_hand = ctx.capabilities().has(Capability::OffHand);
        s.inventory()
            .map_or(0, |inv| inv.empty_slots(off_hand))
            .to_string()
    });

    d.add_static("item_in_hand", LIVE, |ctx, s| {
        material(ctx.accessors().item_in_hand(s).as_ref())
    });
    d.add_static("item_in_hand_name", LIVE, |ctx, s| {
        display_name(ctx.accessors().item_in_hand(s).as_ref())
    });
    d.add_static("item_in_hand_data", LIVE, |ctx, s| {
        let item = ctx.accessors().item_in_hand(s);
        ctx.accessors().item_damage(item.as_ref()).to_string()
    });
    d.add_static("item_in_hand_durability", LIVE, |ctx, s| {
        let item = ctx.accessors().item_in_hand(s);
        ctx.accessors().item_durability(item.as_ref()).to_string()
    });
    d.add_static("item_in_offhand", LIVE, |ctx, s| {
        material(ctx.accessors().item_in_off_hand(s).as_ref())
    });
    d.add_static("item_in_offhand_name", LIVE, |ctx, s| {
        display_name(ctx.accessors().item_in_off_hand(s).as_ref())
    });
    d.add_static("item_in_offhand_data", LIVE, |ctx, s| {
        let item = ctx.accessors().item_in_off_hand(s);
        ctx.accessors().item_damage(item.as_ref()).to_string()
    });

    for (piece, slot) in [
        ("helmet", Slot::Helmet),
        ("chestplate", Slot::Chestplate),
        ("leggings", Slot::Leggings),
        ("boots", Slot::Boots),
    ] {
        d.add_static(format!("armor_{piece}_name"), LIVE, move |_, s| {
            display_name(s.item(slot).as_ref())
        });
        d.add_static(format!("armor_{piece}_data"), LIVE, move |ctx, s| {
            armor_data(ctx, s.item(slot).as_ref())
        });
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn here(subject: &dyn Subject, render: impl FnOnce(&Location) -> String) -> String {
    location(subject, Property::Location)
        .map(|l| render(&l))
        .unwrap_or_default()
}

fn compass(subject: &dyn Subject, render: impl FnOnce(&Location) -> String) -> String {
    location(subject, Property::CompassTarget)
        .map(|l| render(&l))
        .unwrap_or_default()
}

fn ticks(subject: &dyn Subject, property: Property) -> i64 {
    subject
        .property(property)
        .and_then(|v| v.as_i64())
        .unwrap_or(0)
}

fn world_type(environment: &str) -> &'static str {
    match environment {
        "NORMAL" => "Overworld",
        "NETHER" => "Nether",
        "THE_END" => "The End",
        _ => "",
    }
}

/// `PLAINS` → `Plains`.
fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn material(item: Option<&ItemView>) -> String {
    item.map_or_else(|| "AIR".to_string(), |i| i.material.clone())
}

fn display_name(item: Option<&ItemView>) -> String {
    item.filter(|i| !i.is_air())
        .and_then(|i| i.display_name.clone())
        .unwrap_or_default()
}

fn armor_data(ctx: &ResolveContext, item: Option<&ItemView>) -> String {
    ctx.accessors().item_damage(item).to_string()
}

#[cfg(test)]
mod tests {
    use super::super::dispatcher;
    use super::super::test_support::{TestHost, context};
    use super::*;
    use tessera_core::{Enchantment, Inventory, SubjectSnapshot};

    fn steve() -> SubjectSnapshot {
        SubjectSnapshot::new("Steve")
            .with(
                Property::Location,
                Location::new("world", 10.7, 64.0, -0.2).with_rotation(180.0, -12.5),
            )
            .with(Property::WorldEnvironment, "THE_END")
            .with(Property::Biome, "DARK_FOREST")
            .with(Property::Health, 17.0)
            .with(Property::Exp, 0.0)
            .with(Property::Level, 16)
            .with(Property::MaxHealth, 20.0)
            .with(Property::Absorption, 4.0)
            .with(Property::Ping, 120)
            .with(Property::TicksLived, 72_000)
            .with(Property::WorldTime, 18_000)
            .with(Property::AllowFlight, true)
            .with_item(
                Slot::MainHand,
                ItemView {
                    material: "DIAMOND_SWORD".into(),
                    display_name: Some("Excalibur".into()),
                    damage: Some(61),
                    max_durability: 1561,
                    enchantments: vec![Enchantment {
                        key: "minecraft:sharpness".into(),
                        legacy_name: "DAMAGE_ALL".into(),
                        level: 4,
                    }],
                    ..Default::default()
                },
            )
            .with_item(Slot::Helmet, ItemView::new("IRON_HELMET"))
            .with_inventory(Inventory {
                storage: vec![Some(ItemView::new("DIRT")), None],
                helmet: Some(ItemView::new("IRON_HELMET")),
                ..Default::default()
            })
    }

    #[test]
    fn test_position_keys() {
        let d = dispatcher();
        let ctx = context(20, TestHost::default());
        let steve = steve();
        let resolve = |token| d.dispatch(&ctx, token, Some(&steve));

        assert_eq!(resolve("x").as_deref(), Some("10"));
        assert_eq!(resolve("z").as_deref(), Some("-1"));
        assert_eq!(resolve("yaw").as_deref(), Some("180.0"));
        assert_eq!(resolve("direction").as_deref(), Some("NORTH"));
        assert_eq!(resolve("direction_xz").as_deref(), Some("-Z"));
        assert_eq!(resolve("world_type").as_deref(), Some("The End"));
        assert_eq!(resolve("biome_capitalized").as_deref(), Some("Dark_forest"));
        assert_eq!(resolve("compass_x").as_deref(), Some(""));
    }

    #[test]
    fn test_stat_keys() {
        let d = dispatcher();
        let ctx = context(20, TestHost::default());
        let steve = steve();
        let resolve = |token| d.dispatch(&ctx, token, Some(&steve));

        assert_eq!(resolve("health").as_deref(), Some("17.0"));
        assert_eq!(resolve("max_health_rounded").as_deref(), Some("20"));
        assert_eq!(resolve("absorption").as_deref(), Some("4.0"));
        assert_eq!(resolve("current_exp").as_deref(), Some("352"));
        assert_eq!(resolve("allow_flight").as_deref(), Some("yes"));
        assert_eq!(resolve("seconds_lived").as_deref(), Some("3600"));
        assert_eq!(resolve("minutes_lived").as_deref(), Some("60"));
        assert_eq!(resolve("world_time_24").as_deref(), Some("00:00"));
        assert_eq!(resolve("world_time_12").as_deref(), Some("12:00 AM"));
    }

    #[test]
    fn test_ping_keys() {
        let d = dispatcher();
        let ctx = context(20, TestHost::default());
        let steve = steve();
        assert_eq!(d.dispatch(&ctx, "ping", Some(&steve)).as_deref(), Some("120"));
        assert_eq!(
            d.dispatch(&ctx, "colored_ping", Some(&steve)).as_deref(),
            Some("§c120")
        );

        // No native ping and no handle: sentinel, never coloured.
        let legacy = context(8, TestHost::default());
        assert_eq!(d.dispatch(&legacy, "ping", Some(&steve)).as_deref(), Some("-1"));
        assert_eq!(
            d.dispatch(&legacy, "colored_ping", Some(&steve)).as_deref(),
            Some("-1")
        );
    }

    #[test]
    fn test_absorption_sentinel_on_old_versions() {
        let d = dispatcher();
        let ctx = context(14, TestHost::default());
        assert_eq!(
            d.dispatch(&ctx, "absorption", Some(&steve())).as_deref(),
            Some("-1")
        );
    }

    #[test]
    fn test_item_keys() {
        let d = dispatcher();
        let ctx = context(20, TestHost::default());
        let steve = steve();
        let resolve = |token| d.dispatch(&ctx, token, Some(&steve));

        assert_eq!(resolve("item_in_hand").as_deref(), Some("DIAMOND_SWORD"));
        assert_eq!(resolve("item_in_hand_name").as_deref(), Some("Excalibur"));
        assert_eq!(resolve("item_in_hand_data").as_deref(), Some("61"));
        assert_eq!(resolve("item_in_hand_durability").as_deref(), Some("1500"));
        assert_eq!(resolve("item_in_offhand").as_deref(), Some("AIR"));
        assert_eq!(resolve("item_in_offhand_data").as_deref(), Some("0"));
        assert_eq!(resolve("armor_helmet_name").as_deref(), Some(""));
        assert_eq!(resolve("armor_helmet_data").as_deref(), Some("0"));
        assert_eq!(resolve("armor_boots_data").as_deref(), Some("0"));
        assert_eq!(resolve("has_empty_slot").as_deref(), Some("yes"));
        // One free storage slot, three free armor slots, a free off hand.
        assert_eq!(resolve("empty_slots").as_deref(), Some("5"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("PLAINS"), "Plains");
        assert_eq!(capitalize(""), "");
    }
}
