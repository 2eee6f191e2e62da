#![allow(dead_code)]

#[path = "core/canvas.rs"]
mod canvas;
#[path = "core/creation.rs"]
mod creation;
#[path = "core/properties.rs"]
mod properties;
#[path = "core/scenarios.rs"]
mod scenarios;
#[path = "io/export.rs"]
mod export;
