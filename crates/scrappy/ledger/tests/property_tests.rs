#[path = "property/budget_invariant.rs"]
mod budget_invariant;
