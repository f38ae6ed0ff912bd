//! Property tests over randomly generated rooms and students

use chrono::{Days, NaiveDate};
use dorm_db::database::{Database, DataLoader, IndexAdvisor, Table};
use dorm_db::export::Exporter;
use dorm_db::query::{Query, QueryEngine, TOP_N};
use dorm_db::types::{QueryResult, Room, Sex, Student, Value};
use dorm_db::utils::FixedClock;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
}

/// (room count, [(room index, is male, days after 1980-01-01)])
fn campus() -> impl Strategy<Value = (usize, Vec<(usize, bool, u64)>)> {
    (1usize..9).prop_flat_map(|rooms| {
        (
            Just(rooms),
            prop::collection::vec((0..rooms, any::<bool>(), 0u64..10_000), 0..40),
        )
    })
}

fn build(room_count: usize, placements: &[(usize, bool, u64)]) -> (Vec<Room>, Vec<Student>) {
    let base = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
    let rooms = (1..=room_count as i64)
        .map(|id| Room::new(id, format!("Room #{}", id)))
        .collect();
    let students = placements
        .iter()
        .enumerate()
        .map(|(i, (room, male, days))| {
            let sex = if *male { Sex::Male } else { Sex::Female };
            let birthday = base.checked_add_days(Days::new(*days)).unwrap();
            Student::new(i as i64 + 1, format!("S{}", i), birthday, sex, *room as i64 + 1)
        })
        .collect();
    (rooms, students)
}

fn loaded(rooms: &[Room], students: &[Student]) -> Database {
    let mut db = Database::open_in_memory().unwrap();
    db.ensure_schema().unwrap();
    IndexAdvisor::new().ensure(db.conn()).unwrap();
    DataLoader::new().load(&mut db, rooms, students).unwrap();
    db
}

fn floats(result: &QueryResult, column: &str) -> Vec<Option<f64>> {
    result.column_values(column).iter().map(|v| v.as_f64()).collect()
}

fn room_ids(result: &QueryResult) -> Vec<i64> {
    result
        .column_values("room")
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_row_counts_match_input((room_count, placements) in campus()) {
        let (rooms, students) = build(room_count, &placements);
        let db = loaded(&rooms, &students);

        prop_assert_eq!(db.count_rows(Table::Rooms).unwrap(), rooms.len() as i64);
        prop_assert_eq!(db.count_rows(Table::Students).unwrap(), students.len() as i64);
    }

    #[test]
    fn test_occupancy_sums_to_student_count((room_count, placements) in campus()) {
        let (rooms, students) = build(room_count, &placements);
        let db = loaded(&rooms, &students);
        let result = QueryEngine::new(db.conn(), &clock()).room_occupancy().unwrap();

        prop_assert_eq!(result.num_rows(), rooms.len());
        let total: i64 = result.column_values("count").iter().map(|v| v.as_i64().unwrap()).sum();
        prop_assert_eq!(total, students.len() as i64);

        let ids = room_ids(&result);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        prop_assert_eq!(ids, sorted);
    }

    #[test]
    fn test_lowest_average_age_shape((room_count, placements) in campus()) {
        let (rooms, students) = build(room_count, &placements);
        let db = loaded(&rooms, &students);
        let result = QueryEngine::new(db.conn(), &clock()).lowest_average_age().unwrap();

        let non_empty: BTreeSet<i64> = students.iter().map(|s| s.room_id).collect();
        prop_assert_eq!(result.num_rows(), non_empty.len().min(TOP_N));

        let ages = floats(&result, "avg_age");
        prop_assert!(ages.iter().all(Option::is_some));
        prop_assert!(ages.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_largest_age_gap_shape((room_count, placements) in campus()) {
        let (rooms, students) = build(room_count, &placements);
        let db = loaded(&rooms, &students);
        let result = QueryEngine::new(db.conn(), &clock()).largest_age_gap().unwrap();

        prop_assert_eq!(result.num_rows(), rooms.len().min(TOP_N));

        let mut per_room: BTreeMap<i64, usize> = BTreeMap::new();
        for student in &students {
            *per_room.entry(student.room_id).or_default() += 1;
        }

        let gaps = floats(&result, "age_gap");
        // Populated rooms first, by descending gap; empty rooms (NULL) last.
        let populated: Vec<f64> = gaps.iter().map_while(|g| *g).collect();
        prop_assert!(gaps[populated.len()..].iter().all(Option::is_none));
        prop_assert!(populated.windows(2).all(|w| w[0] >= w[1]));

        for (room, gap) in room_ids(&result).into_iter().zip(&gaps) {
            match per_room.get(&room) {
                None => prop_assert!(gap.is_none()),
                Some(1) => prop_assert_eq!(*gap, Some(0.0)),
                Some(_) => prop_assert!(gap.unwrap() >= 0.0),
            }
        }
    }

    #[test]
    fn test_mixed_sex_membership((room_count, placements) in campus()) {
        let (rooms, students) = build(room_count, &placements);
        let db = loaded(&rooms, &students);
        let result = QueryEngine::new(db.conn(), &clock()).mixed_sex_rooms().unwrap();

        let mut sexes: BTreeMap<i64, BTreeSet<&str>> = BTreeMap::new();
        for student in &students {
            sexes.entry(student.room_id).or_default().insert(student.sex.as_str());
        }
        let expected: Vec<i64> = sexes
            .into_iter()
            .filter(|(_, set)| set.len() > 1)
            .map(|(room, _)| room)
            .collect();

        prop_assert_eq!(room_ids(&result), expected);
    }

    #[test]
    fn test_json_export_round_trip((room_count, placements) in campus()) {
        let (rooms, students) = build(room_count, &placements);
        let db = loaded(&rooms, &students);
        let engine = QueryEngine::new(db.conn(), &clock());

        for query in Query::ALL {
            let result = engine.run(query).unwrap();
            let bytes = Exporter::Json.serialize(query.name(), &result).unwrap();
            let parsed: Vec<serde_json::Map<String, serde_json::Value>> =
                serde_json::from_slice(&bytes).unwrap();

            prop_assert_eq!(parsed.len(), result.num_rows());
            for (object, row) in parsed.iter().zip(&result.rows) {
                prop_assert_eq!(object.len(), result.columns.len());
                for (column, value) in result.columns.iter().zip(&row.values) {
                    let exported = &object[column];
                    match value {
                        Value::Integer(v) => prop_assert_eq!(exported.as_i64(), Some(*v)),
                        Value::Real(v) => prop_assert_eq!(exported.as_f64(), Some(*v)),
                        Value::Text(v) => prop_assert_eq!(exported.as_str(), Some(v.as_str())),
                        Value::Null => prop_assert!(exported.is_null()),
                    }
                }
            }
        }
    }
}
