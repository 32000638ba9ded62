/// Unit tests over the public library API
mod streak_rules;
mod invariants;
