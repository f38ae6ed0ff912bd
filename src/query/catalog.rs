//! The fixed analytical queries
//!
//! All aggregation happens in SQL. Ages are fractional years,
//! `(julianday(:today) - julianday(birthday)) / 365.25`, rounded to three
//! decimals; ordering uses the rounded value so ties match what is exported.

use std::fmt;
use std::str::FromStr;

/// Analytical queries, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// Student count for every room, including empty rooms
    RoomOccupancy,

    /// Five rooms with the youngest average student age
    LowestAverageAge,

    /// Five rooms with the largest spread between oldest and youngest
    LargestAgeGap,

    /// Rooms housing both male and female students
    MixedSexRooms,
}

/// Maximum rows returned by the top-N queries
pub const TOP_N: usize = 5;

const ROOM_OCCUPANCY_SQL: &str = "
    SELECT r.id AS room, r.name AS name, COUNT(s.id) AS count
    FROM rooms AS r
    LEFT JOIN students AS s ON s.room_id = r.id
    GROUP BY r.id, r.name
    ORDER BY r.id ASC";

const LOWEST_AVERAGE_AGE_SQL: &str = "
    SELECT r.id AS room, r.name AS name,
           ROUND(AVG((julianday(:today) - julianday(s.birthday)) / 365.25), 3) AS avg_age
    FROM rooms AS r
    JOIN students AS s ON s.room_id = r.id
    GROUP BY r.id, r.name
    ORDER BY avg_age ASC, r.id ASC
    LIMIT 5";

// Empty rooms have a NULL gap and sort after every populated room.
const LARGEST_AGE_GAP_SQL: &str = "
    SELECT r.id AS room, r.name AS name,
           ROUND((MAX(julianday(:today) - julianday(s.birthday))
                - MIN(julianday(:today) - julianday(s.birthday))) / 365.25, 3) AS age_gap
    FROM rooms AS r
    LEFT JOIN students AS s ON s.room_id = r.id
    GROUP BY r.id, r.name
    ORDER BY age_gap IS NULL, age_gap DESC, r.id ASC
    LIMIT 5";

const MIXED_SEX_ROOMS_SQL: &str = "
    SELECT r.id AS room, r.name AS name
    FROM rooms AS r
    JOIN students AS s ON s.room_id = r.id
    GROUP BY r.id, r.name
    HAVING COUNT(DISTINCT s.sex) > 1
    ORDER BY r.id ASC";

impl Query {
    /// Every query, in report order
    pub const ALL: [Query; 4] = [
        Query::RoomOccupancy,
        Query::LowestAverageAge,
        Query::LargestAgeGap,
        Query::MixedSexRooms,
    ];

    /// Stable name, used for output files and XML root elements
    pub fn name(&self) -> &'static str {
        match self {
            Query::RoomOccupancy => "room_occupancy",
            Query::LowestAverageAge => "lowest_average_age",
            Query::LargestAgeGap => "largest_age_gap",
            Query::MixedSexRooms => "mixed_sex_rooms",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Query::RoomOccupancy => ROOM_OCCUPANCY_SQL,
            Query::LowestAverageAge => LOWEST_AVERAGE_AGE_SQL,
            Query::LargestAgeGap => LARGEST_AGE_GAP_SQL,
            Query::MixedSexRooms => MIXED_SEX_ROOMS_SQL,
        }
    }

    /// Whether the statement binds the `:today` reference date
    pub fn uses_reference_date(&self) -> bool {
        matches!(self, Query::LowestAverageAge | Query::LargestAgeGap)
    }

    /// Result columns, in order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Query::RoomOccupancy => &["room", "name", "count"],
            Query::LowestAverageAge => &["room", "name", "avg_age"],
            Query::LargestAgeGap => &["room", "name", "age_gap"],
            Query::MixedSexRooms => &["room", "name"],
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Query {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| format!("unknown query '{}'", s))
    }
}
