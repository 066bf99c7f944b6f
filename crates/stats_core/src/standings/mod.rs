//! Standings ranking engine
//!
//! Raw results fold into [`ClubSeasonAggregate`]s, a [`TieBreakPolicy`] orders
//! them, and [`StandingsComputer`] assembles the final [`Standing`].

pub mod aggregate;
pub mod computer;
pub mod criteria;
pub mod policy;
pub mod profiles;

pub use aggregate::{ClubSeasonAggregate, POINTS_FOR_DRAW, POINTS_FOR_WIN};
pub use computer::{ClubResults, Standing, StandingRow, StandingsComputer};
pub use criteria::Criterion;
pub use policy::{PolicySource, TieBreakPolicy, TieBreakStep};
pub use profiles::{profile_table, ProfileTable};
