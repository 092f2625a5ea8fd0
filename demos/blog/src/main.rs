//! blog — smallest example for the rust_acts behavior framework.
//!
//! A `Posts` model acquires two behaviors without subclassing anything:
//! `Sluggable` (installs a `slug` member on every entity) and `Fly` (answers
//! forwarded `fly` calls in static and instance context).  Walks through
//! declaration-driven binding, config queries, re-binding, and the
//! dispatch-miss signal the host's own error handling would consume.
//!
//! Run with `RUST_LOG=debug` to watch bind/dispatch decisions.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Value, json};

use acts_core::{ActsError, ActsResult, ConfigMap, Entity, ModelName};
use acts_behavior::{
    Behavior, BehaviorDescriptor, BehaviorInstance, EntityCapability, StaticCapability,
    TableLocator,
};
use acts_model::ModelType;

// ── Sluggable behavior ────────────────────────────────────────────────────────

/// Installs a `slug` capability that derives a URL slug from a configured
/// source field and stores it back on the entity.
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
        object(json!({"field": "title", "separator": "-"}))
    }

    fn installed_capabilities(
        &self,
        _model:  &ModelName,
        _config: &ConfigMap,
    ) -> Vec<(String, EntityCapability)> {
        vec![("slug".to_string(), slugify as EntityCapability)]
    }
}

// ── Fly behavior ──────────────────────────────────────────────────────────────

/// Answers `fly` in both call shapes, reading the speed label from its
/// per-model configuration.
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
        object(json!({"speed_label": "1h54"}))
    }

    fn static_capability(&self, method: &str) -> Option<StaticCapability> {
        (method == "fly").then_some(fly_static as StaticCapability)
    }

    fn entity_capability(&self, method: &str) -> Option<EntityCapability> {
        (method == "fly").then_some(fly_entity as EntityCapability)
    }
}

fn object(value: Value) -> ConfigMap {
    match value {
        Value::Object(map) => map,
        _ => ConfigMap::new(),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== blog — rust_acts behavior framework ===");
    println!();

    // 1. Host-side locator: behavior names → implementations.
    let locator = Arc::new(
        TableLocator::new()
            .with("Sluggable", BehaviorDescriptor::new("behavior/Sluggable", Arc::new(Sluggable)))
            .with("Fly", BehaviorDescriptor::new("behavior/Fly", Arc::new(Fly))),
    );

    // 2. The Posts model declares its behaviors; nothing binds until first use.
    let posts = Arc::new(
        ModelType::builder("Posts", locator)
            .acts_as(("Sluggable", json!({"separator": "-"})))
            .acts_as("Fly")
            .build(),
    );
    println!("declared, not yet initialized: {}", !posts.is_initialized());

    // 3. First facade touch triggers declaration-driven binding.
    println!("has Sluggable: {}", posts.has_behavior("Sluggable"));
    println!(
        "Sluggable config: {}",
        Value::Object(posts.behavior_config("Sluggable")?)
    );

    // 4. The installed `slug` member, directly callable on any entity.
    let mut post = posts.create(object(json!({"title": "Behaviors Without Subclassing"})));
    let slug = posts.call_entity(&mut post, "slug", &[])?;
    println!("slug: {slug}");

    // 5. Forwarded static call, default configuration.
    println!("{}", posts.call("fly", &[json!("New York")])?);

    // 6. Re-bind with an override; the entity-level call sees the new label.
    posts.bind_behavior("Fly", json!({"speed_label": "1h24"}))?;
    println!("{}", posts.call_entity(&mut post, "fly", &[json!("Las Vegas")])?);

    // 7. Unbind, then show the miss signal the host would translate into its
    //    own "unknown member" error.
    posts.unbind_behavior("Fly")?;
    match posts.call("fly", &[json!("Las Vegas")]) {
        Err(ActsError::DispatchMiss { model, method }) => {
            println!("dispatch miss: `{method}` is unknown on `{model}` again");
        }
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
