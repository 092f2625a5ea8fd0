//! Unit tests for acts-model.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use acts_core::config::{self, ConfigMap};
use acts_core::{ActsError, ActsResult, BehaviorId, Entity, ModelName};
use acts_behavior::{
    Behavior, BehaviorDescriptor, BehaviorInstance, EntityCapability, Locator, StaticCapability,
    TableLocator,
};

use crate::{BehaviorDecl, BindingTable, ModelType, declarations_from_json};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn map(value: Value) -> ConfigMap {
    match value {
        Value::Object(m) => m,
        other => panic!("expected object, got {other}"),
    }
}

fn posts(locator: Arc<dyn Locator>) -> ModelType {
    ModelType::builder("Posts", locator).build()
}

fn locator() -> Arc<dyn Locator> {
    Arc::new(
        TableLocator::new()
            .with("Fly", BehaviorDescriptor::new("behavior/Fly", Arc::new(Fly)))
            .with("Hare", BehaviorDescriptor::new("behavior/Hare", Arc::new(Hare)))
            .with("Tortoise", BehaviorDescriptor::new("behavior/Tortoise", Arc::new(Tortoise)))
            .with("Sluggable", BehaviorDescriptor::new("behavior/Sluggable", Arc::new(Sluggable)))
            .with("TouchA", BehaviorDescriptor::new("behavior/TouchA", Arc::new(TouchA)))
            .with("TouchB", BehaviorDescriptor::new("behavior/TouchB", Arc::new(TouchB))),
    )
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Travel announcements; the speed label comes from the instance config.
struct Fly;

fn fly_static(_model: &ModelName, instance: &BehaviorInstance, args: &[Value]) -> ActsResult<Value> {
    let target = args.first().and_then(Value::as_str).unwrap_or("nowhere");
    let label = instance
        .config_value("speed_label")
        .and_then(Value::as_str)
        .unwrap_or("?");
    Ok(Value::String(format!("{target} reached in {label}.")))
}

fn fly_entity(
    model:    &ModelName,
    instance: &BehaviorInstance,
    _entity:  &mut Entity,
    args:     &[Value],
) -> ActsResult<Value> {
    fly_static(model, instance, args)
}

impl Behavior for Fly {
    fn defaults(&self) -> ConfigMap {
        map(json!({"speed_label": "1h54"}))
    }

    fn static_capability(&self, method: &str) -> Option<StaticCapability> {
        (method == "fly").then_some(fly_static as StaticCapability)
    }

    fn entity_capability(&self, method: &str) -> Option<EntityCapability> {
        (method == "fly").then_some(fly_entity as EntityCapability)
    }
}

/// `Hare` and `Tortoise` both answer the static capability `race`, so tests
/// can observe which binding dispatch reaches first.
struct Hare;

fn hare_race(_m: &ModelName, _i: &BehaviorInstance, _a: &[Value]) -> ActsResult<Value> {
    Ok(json!("hare"))
}

impl Behavior for Hare {
    fn defaults(&self) -> ConfigMap {
        map(json!({"pace": "fast", "track": "grass"}))
    }

    fn static_capability(&self, method: &str) -> Option<StaticCapability> {
        (method == "race").then_some(hare_race as StaticCapability)
    }
}

struct Tortoise;

fn tortoise_race(_m: &ModelName, _i: &BehaviorInstance, _a: &[Value]) -> ActsResult<Value> {
    Ok(json!("tortoise"))
}

impl Behavior for Tortoise {
    fn static_capability(&self, method: &str) -> Option<StaticCapability> {
        (method == "race").then_some(tortoise_race as StaticCapability)
    }
}

/// Installs one entity capability under a configurable name (`"as"`), slug-
/// ging a configurable source field.
struct Sluggable;

fn slugify(
    _model:   &ModelName,
    instance: &BehaviorInstance,
    entity:   &mut Entity,
    _args:    &[Value],
) -> ActsResult<Value> {
    let field = instance
        .config_value("field")
        .and_then(Value::as_str)
        .unwrap_or("title");
    let separator = instance
        .config_value("separator")
        .and_then(Value::as_str)
        .unwrap_or("-");
    let source = entity
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase();
    let slug = source.split_whitespace().collect::<Vec<_>>().join(separator);
    entity.set("slug", Value::String(slug.clone()));
    Ok(Value::String(slug))
}

impl Behavior for Sluggable {
    fn defaults(&self) -> ConfigMap {
        map(json!({"as": "slug", "field": "title", "separator": "-"}))
    }

    fn installed_capabilities(
        &self,
        _model: &ModelName,
        config: &ConfigMap,
    ) -> Vec<(String, EntityCapability)> {
        let name = config
            .get("as")
            .and_then(Value::as_str)
            .unwrap_or("slug")
            .to_string();
        vec![(name, slugify as EntityCapability)]
    }
}

/// Two behaviors installing the same capability name, to exercise the
/// last-wins collision policy.
struct TouchA;

fn touch_a(
    _m: &ModelName,
    _i: &BehaviorInstance,
    _e: &mut Entity,
    _a: &[Value],
) -> ActsResult<Value> {
    Ok(json!("touched by A"))
}

impl Behavior for TouchA {
    fn installed_capabilities(
        &self,
        _model:  &ModelName,
        _config: &ConfigMap,
    ) -> Vec<(String, EntityCapability)> {
        vec![("touch".to_string(), touch_a as EntityCapability)]
    }
}

struct TouchB;

fn touch_b(
    _m: &ModelName,
    _i: &BehaviorInstance,
    _e: &mut Entity,
    _a: &[Value],
) -> ActsResult<Value> {
    Ok(json!("touched by B"))
}

impl Behavior for TouchB {
    fn installed_capabilities(
        &self,
        _model:  &ModelName,
        _config: &ConfigMap,
    ) -> Vec<(String, EntityCapability)> {
        vec![("touch".to_string(), touch_b as EntityCapability)]
    }
}

/// Counts merge-entry-point invocations; one bind merges exactly once.
struct Probe {
    merges: Arc<AtomicUsize>,
}

impl Behavior for Probe {
    fn merge_config(
        &self,
        _model:   &ModelName,
        supplied: ConfigMap,
        defaults: ConfigMap,
    ) -> ActsResult<ConfigMap> {
        self.merges.fetch_add(1, Ordering::SeqCst);
        Ok(config::shallow_merge(supplied, defaults))
    }
}

// ── BindingTable ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod table_tests {
    use super::*;

    fn instance(id: &str) -> Arc<BehaviorInstance> {
        Arc::new(
            BehaviorInstance::new(
                BehaviorId::new(id),
                ModelName::new("Posts"),
                Arc::new(Fly),
                ConfigMap::new(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn preserves_insertion_order() {
        let mut table = BindingTable::new();
        assert!(table.upsert(instance("a")));
        assert!(table.upsert(instance("b")));
        assert!(table.upsert(instance("c")));

        let order: Vec<String> = table.iter().map(|i| i.id().to_string()).collect();
        assert_eq!(order, ["a", "b", "c"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut table = BindingTable::new();
        table.upsert(instance("a"));
        table.upsert(instance("b"));

        assert!(!table.upsert(instance("a")));

        assert_eq!(table.position(&BehaviorId::new("a")), Some(0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn remove_is_none_when_absent() {
        let mut table = BindingTable::new();
        table.upsert(instance("a"));

        assert!(table.remove(&BehaviorId::new("b")).is_none());
        assert!(table.remove(&BehaviorId::new("a")).is_some());
        assert!(table.is_empty());
        assert!(!table.contains(&BehaviorId::new("a")));
    }
}

// ── Declarations ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod decl_tests {
    use super::*;

    #[test]
    fn shorthand_and_configured_forms() {
        let decls = declarations_from_json(json!([
            "SoftDelete",
            {"Sluggable": {"field": "name"}},
        ]))
        .unwrap();

        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "SoftDelete");
        assert_eq!(decls[0].config, Value::Null);
        assert_eq!(decls[1].name, "Sluggable");
        assert_eq!(decls[1].config, json!({"field": "name"}));
    }

    #[test]
    fn rejects_non_list_and_bad_entries() {
        for bad in [
            json!(42),
            json!([7]),
            json!([{"A": {}, "B": {}}]),
            json!([[]]),
        ] {
            match declarations_from_json(bad) {
                Err(ActsError::Misconfiguration(_)) => {}
                other => panic!("expected Misconfiguration, got {other:?}"),
            }
        }
    }

    #[test]
    fn bare_name_conversion() {
        let decl = BehaviorDecl::from("SoftDelete");
        assert_eq!(decl.name, "SoftDelete");
        assert_eq!(decl.config, Value::Null);
    }
}

// ── Binding registry ──────────────────────────────────────────────────────────

#[cfg(test)]
mod bind_tests {
    use super::*;

    #[test]
    fn bind_then_unbind_leaves_has_false() {
        let model = posts(locator());

        assert!(!model.has_behavior("Fly"));
        model.bind_behavior("Fly", Value::Null).unwrap();
        assert!(model.has_behavior("Fly"));
        model.unbind_behavior("Fly").unwrap();
        assert!(!model.has_behavior("Fly"));
    }

    #[test]
    fn bind_unresolvable_name_is_not_found() {
        let model = posts(locator());
        match model.bind_behavior("Ghost", Value::Null) {
            Err(ActsError::NotFound { kind, name }) => {
                assert_eq!(kind, "behavior");
                assert_eq!(name, "Ghost");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unbind_and_lookup_of_unbound_are_not_bound() {
        let model = posts(locator());

        match model.unbind_behavior("Fly") {
            Err(ActsError::NotBound { behavior, .. }) => {
                assert!(behavior == *"behavior/Fly");
            }
            other => panic!("expected NotBound, got {other:?}"),
        }
        assert!(matches!(model.behavior("Fly"), Err(ActsError::NotBound { .. })));
        assert!(matches!(model.behavior_config("Fly"), Err(ActsError::NotBound { .. })));
    }

    #[test]
    fn rebind_reconfigures_in_place() {
        let model = posts(locator());
        model.bind_behavior("Hare", json!({"lane": 1})).unwrap();
        model.bind_behavior("Tortoise", Value::Null).unwrap();

        model.bind_behavior("Hare", json!({"pace": "steady"})).unwrap();

        // Exactly one instance, config = C2 merged over declared defaults.
        let config = model.behavior_config("Hare").unwrap();
        assert_eq!(config.get("pace"), Some(&json!("steady")));
        assert_eq!(config.get("track"), Some(&json!("grass")));
        assert_eq!(config.get("lane"), None, "first bind's override must not linger");

        // Original insertion position kept: Hare still answers before Tortoise.
        assert_eq!(model.call("race", &[]).unwrap(), json!("hare"));
    }

    #[test]
    fn bind_accepts_a_descriptor_directly() {
        // "Walkabout" is unknown to the locator; the descriptor carries the
        // implementation itself.
        let model = posts(locator());
        let descriptor = BehaviorDescriptor::new("behavior/Walkabout", Arc::new(Fly));

        model.bind_behavior(descriptor, json!({"speed_label": "3d"})).unwrap();

        assert_eq!(
            model.call("fly", &[json!("Uluru")]).unwrap(),
            json!("Uluru reached in 3d.")
        );
        // Still unresolvable by name, so `has` stays false.
        assert!(!model.has_behavior("Walkabout"));
    }

    #[test]
    fn non_mapping_config_fails_without_side_effect() {
        let model = posts(locator());
        match model.bind_behavior("Fly", json!("fast")) {
            Err(ActsError::Misconfiguration(_)) => {}
            other => panic!("expected Misconfiguration, got {other:?}"),
        }
        assert!(!model.has_behavior("Fly"));
    }

    #[test]
    fn config_accessors() {
        let model = posts(locator());
        model.bind_behavior("Fly", json!({"retries": 2})).unwrap();

        let config = model.behavior_config("Fly").unwrap();
        assert_eq!(config.get("speed_label"), Some(&json!("1h54")));
        assert_eq!(config.get("retries"), Some(&json!(2)));

        assert_eq!(
            model.behavior_config_value("Fly", "speed_label").unwrap(),
            Some(json!("1h54"))
        );
        assert_eq!(model.behavior_config_value("Fly", "missing").unwrap(), None);
    }

    #[test]
    fn instance_carries_model_backref() {
        let model = posts(locator());
        model.bind_behavior("Fly", Value::Null).unwrap();

        let instance = model.behavior("Fly").unwrap();
        assert_eq!(instance.model().as_str(), "Posts");
        assert!(*instance.id() == *"behavior/Fly");
    }
}

// ── Lazy initialization ───────────────────────────────────────────────────────

#[cfg(test)]
mod init_tests {
    use super::*;

    #[test]
    fn declared_behaviors_bind_on_first_use() {
        let model = ModelType::builder("Posts", locator())
            .acts_as("Fly")
            .build();

        assert!(!model.is_initialized());
        // No explicit bind — dispatch alone must trigger initialization.
        assert_eq!(
            model.call("fly", &[json!("New York")]).unwrap(),
            json!("New York reached in 1h54.")
        );
        assert!(model.is_initialized());
        assert!(model.has_behavior("Fly"));
    }

    #[test]
    fn declaration_order_is_dispatch_order() {
        let model = ModelType::builder("Posts", locator())
            .acts_as("Tortoise")
            .acts_as("Hare")
            .build();

        assert_eq!(model.call("race", &[]).unwrap(), json!("tortoise"));
    }

    #[test]
    fn declared_config_applies() {
        let model = ModelType::builder("Posts", locator())
            .acts_as(("Fly", json!({"speed_label": "2h05"})))
            .build();

        assert_eq!(
            model.behavior_config_value("Fly", "speed_label").unwrap(),
            Some(json!("2h05"))
        );
    }

    #[test]
    fn declarations_from_json_feed_the_builder() {
        let decls = declarations_from_json(json!([
            "Tortoise",
            {"Fly": {"speed_label": "0h30"}},
        ]))
        .unwrap();
        let model = ModelType::builder("Posts", locator()).declarations(decls).build();

        assert_eq!(model.call("race", &[]).unwrap(), json!("tortoise"));
        assert_eq!(
            model.call("fly", &[json!("Boston")]).unwrap(),
            json!("Boston reached in 0h30.")
        );
    }

    #[test]
    fn initialization_runs_exactly_once_under_concurrent_first_use() {
        let merges = Arc::new(AtomicUsize::new(0));
        let locator: Arc<dyn Locator> = Arc::new(TableLocator::new().with(
            "Probe",
            BehaviorDescriptor::new(
                "behavior/Probe",
                Arc::new(Probe { merges: Arc::clone(&merges) }),
            ),
        ));
        let model = ModelType::builder("Posts", locator).acts_as("Probe").build();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert!(model.has_behavior("Probe")));
            }
        });

        // Declaration-driven binding merged exactly once despite 8 racing
        // first accesses.
        assert_eq!(merges.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_declaration_is_replayed_to_every_caller() {
        let model = ModelType::builder("Posts", locator())
            .acts_as("Fly")
            .acts_as("Ghost")
            .build();

        for _ in 0..2 {
            match model.ensure_initialized() {
                Err(ActsError::NotFound { name, .. }) => assert_eq!(name, "Ghost"),
                other => panic!("expected NotFound, got {other:?}"),
            }
        }
        assert!(model.is_initialized());
        assert!(!model.has_behavior("Fly"));
    }

    #[test]
    fn malformed_declared_config_is_misconfiguration() {
        let model = ModelType::builder("Posts", locator())
            .acts_as(("Fly", json!([1, 2, 3])))
            .build();

        assert!(matches!(
            model.ensure_initialized(),
            Err(ActsError::Misconfiguration(_))
        ));
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn first_binding_wins() {
        let model = posts(locator());
        model.bind_behavior("Hare", Value::Null).unwrap();
        model.bind_behavior("Tortoise", Value::Null).unwrap();

        assert_eq!(model.call("race", &[]).unwrap(), json!("hare"));
    }

    #[test]
    fn static_miss_is_a_signal() {
        let model = posts(locator());
        model.bind_behavior("Fly", Value::Null).unwrap();

        match model.call("swim", &[]) {
            Err(ActsError::DispatchMiss { model, method }) => {
                assert_eq!(model.as_str(), "Posts");
                assert_eq!(method, "swim");
            }
            other => panic!("expected DispatchMiss, got {other:?}"),
        }
    }

    #[test]
    fn entity_dispatch_reaches_entity_capabilities() {
        let model = posts(locator());
        model.bind_behavior("Fly", Value::Null).unwrap();

        let mut entity = model.create(ConfigMap::new());
        assert_eq!(
            model.call_entity(&mut entity, "fly", &[json!("Paris")]).unwrap(),
            json!("Paris reached in 1h54.")
        );
        assert!(matches!(
            model.call_entity(&mut entity, "swim", &[]),
            Err(ActsError::DispatchMiss { .. })
        ));
    }

    #[test]
    fn fly_round_trip() {
        let model = posts(locator());

        // Bind with no overrides: the declared default speed label applies.
        model.bind_behavior("Fly", json!({})).unwrap();
        assert_eq!(
            model.call("fly", &[json!("New York")]).unwrap(),
            json!("New York reached in 1h54.")
        );

        // Re-bind with a faster label; the entity-level capability sees it.
        model.bind_behavior("Fly", json!({"speed_label": "1h24"})).unwrap();
        let mut entity = model.create(ConfigMap::new());
        assert_eq!(
            model.call_entity(&mut entity, "fly", &[json!("Las Vegas")]).unwrap(),
            json!("Las Vegas reached in 1h24.")
        );
    }
}

// ── Installed capabilities ────────────────────────────────────────────────────

#[cfg(test)]
mod install_tests {
    use super::*;

    fn entity_with_title(model: &ModelType, title: &str) -> Entity {
        model.create(map(json!({"title": title})))
    }

    #[test]
    fn installed_capability_is_directly_callable() {
        let model = posts(locator());
        model.bind_behavior("Sluggable", Value::Null).unwrap();

        let mut entity = entity_with_title(&model, "Hello Wonderful World");
        let slug = model.call_entity(&mut entity, "slug", &[]).unwrap();

        assert_eq!(slug, json!("hello-wonderful-world"));
        assert_eq!(entity.get("slug"), Some(&json!("hello-wonderful-world")));
    }

    #[test]
    fn installation_uses_the_merged_config() {
        let model = posts(locator());
        model
            .bind_behavior("Sluggable", json!({"separator": "_", "field": "headline"}))
            .unwrap();

        let mut entity = model.create(map(json!({"headline": "Breaking News Today"})));
        let slug = model.call_entity(&mut entity, "slug", &[]).unwrap();
        assert_eq!(slug, json!("breaking_news_today"));
    }

    #[test]
    fn rebind_reconfigures_but_does_not_reinstall() {
        let model = posts(locator());
        model.bind_behavior("Sluggable", Value::Null).unwrap();

        // New capability name in the re-bind config — but capabilities were
        // materialized at first bind, so `permalink` never appears...
        model
            .bind_behavior("Sluggable", json!({"as": "permalink", "separator": "+"}))
            .unwrap();

        let mut entity = entity_with_title(&model, "Hello World");
        assert!(matches!(
            model.call_entity(&mut entity, "permalink", &[]),
            Err(ActsError::DispatchMiss { .. })
        ));

        // ...while the entry installed under `slug` re-derives the live
        // instance and therefore sees the reconfigured separator.
        let slug = model.call_entity(&mut entity, "slug", &[]).unwrap();
        assert_eq!(slug, json!("hello+world"));
    }

    #[test]
    fn colliding_installations_resolve_last_wins() {
        let model = posts(locator());
        model.bind_behavior("TouchA", Value::Null).unwrap();
        model.bind_behavior("TouchB", Value::Null).unwrap();

        let mut entity = model.create(ConfigMap::new());
        assert_eq!(
            model.call_entity(&mut entity, "touch", &[]).unwrap(),
            json!("touched by B")
        );
    }

    #[test]
    fn unbound_contributor_falls_through_to_the_scan() {
        let model = posts(locator());
        model.bind_behavior("Sluggable", Value::Null).unwrap();
        model.unbind_behavior("Sluggable").unwrap();

        // The installed entry survives unbind but cannot re-derive a live
        // instance; nothing else answers `slug`, so the call misses.
        let mut entity = entity_with_title(&model, "Hello");
        assert!(matches!(
            model.call_entity(&mut entity, "slug", &[]),
            Err(ActsError::DispatchMiss { .. })
        ));

        // Re-binding revives it.
        model.bind_behavior("Sluggable", Value::Null).unwrap();
        assert_eq!(
            model.call_entity(&mut entity, "slug", &[]).unwrap(),
            json!("hello")
        );
    }
}
