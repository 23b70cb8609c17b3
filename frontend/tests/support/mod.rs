//! Shared helpers for behavioural tests against the public page API.

pub mod doubles;

use frontend::domain::{PhotoCandidate, User, UserId};
use pagination::{Page, PageLinks};

/// Build a listed user whose identifier and timestamp are `timestamp`.
pub fn user(timestamp: i64) -> User {
    let id = u64::try_from(timestamp).expect("non-negative timestamp");
    User {
        id: UserId::new(id),
        name: format!("User {id}"),
        email: format!("user{id}@example.test"),
        phone: "+380671234567".to_owned(),
        position: "Designer".to_owned(),
        photo: format!("https://cdn.example.test/{id}.jpg"),
        registration_timestamp: timestamp,
    }
}

/// Build page `number` of `total_pages` holding users with `timestamps`.
pub fn users_page(number: u32, total_pages: u32, timestamps: &[i64]) -> Page<User> {
    let users = timestamps.iter().copied().map(user).collect();
    Page::new(number, total_pages, PageLinks::default(), users).expect("valid page")
}

/// A JPEG-looking candidate; the stub probe decides its dimensions.
pub fn jpeg_candidate() -> PhotoCandidate {
    PhotoCandidate::new(
        "avatar.jpg",
        Some("image/jpeg".to_owned()),
        vec![0xFF_u8; 2048],
    )
}
