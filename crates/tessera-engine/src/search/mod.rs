//! Search algorithms, move ordering, and the iterative-deepening driver.

pub mod control;
pub mod driver;
pub mod heuristics;
pub mod instance;
pub mod line;
pub mod negamax;
pub mod ordering;
pub mod params;
pub mod report;
pub mod score;
pub mod tt;
