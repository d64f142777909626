mod catalog;
mod common;
mod evaluator;
