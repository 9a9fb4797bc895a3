//! Renderer adapters.

mod csharp;
mod fragments;

pub use csharp::CSharpRenderer;
