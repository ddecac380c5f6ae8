//! Analysis engine for perfwatch.
//!
//! Two independent flows share this crate:
//! - leak monitoring: text → [`memory`] signals → [`classify`] events → storage + report
//! - regression detection: two record sets → [`matching`] → [`regression`] →
//!   [`aggregate`] → [`report`]

pub mod aggregate;
pub mod classify;
pub mod matching;
pub mod memory;
pub mod regression;
pub mod report;
