mod baseline;
mod common;
mod unifier;
