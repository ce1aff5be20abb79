//! Reference exercise catalog
//!
//! Mirrors the rows seeded by `migrations/0005_seed_exercises.sql`, so the
//! in-memory store serves the same catalog as a fresh database.

use crate::shared::models::Exercise;

const REFERENCE_EXERCISES: &[(i32, &str, &str, &str, bool)] = &[
    (1, "Back Squat", "Legs", "Intermediate", true),
    (2, "Romanian Deadlift", "Hamstrings", "Intermediate", true),
    (3, "Walking Lunge", "Legs", "Beginner", false),
    (4, "Bench Press", "Chest", "Intermediate", true),
    (5, "Push-Up", "Chest", "Beginner", false),
    (6, "Pull-Up", "Back", "Intermediate", true),
    (7, "Bent-Over Row", "Back", "Intermediate", true),
    (8, "Overhead Press", "Shoulders", "Intermediate", true),
    (9, "Plank", "Core", "Beginner", false),
    (10, "Deadlift", "Back", "Advanced", true),
];

pub fn reference_exercises() -> Vec<Exercise> {
    REFERENCE_EXERCISES
        .iter()
        .map(|&(exercise_id, name, muscle_group, difficulty, equipment)| Exercise {
            exercise_id,
            name: name.to_string(),
            muscle_group: muscle_group.to_string(),
            difficulty: difficulty.to_string(),
            equipment,
        })
        .collect()
}
