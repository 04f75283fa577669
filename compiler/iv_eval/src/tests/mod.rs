//! Evaluator tests over hand-built expression trees.
//!
//! `harness` builds arenas and a small primitive library; the other
//! modules exercise one area of the evaluator each.


mod closure_tests;
mod dispatch_tests;
