//! Bootstrap data used when a slot has never been written.
//!
//! The default accounts are a convenience for first start. They are not a
//! security feature.

use crate::model::{Card, Role, UserRecord};

pub const DEFAULT_ADMIN: (&str, &str, &str) = ("admin", "admin@test.com", "admin123");
pub const DEFAULT_USER: (&str, &str, &str) = ("user", "user@test.com", "user123");

pub fn default_users() -> Vec<UserRecord> {
    let (admin_id, admin_email, admin_pw) = DEFAULT_ADMIN;
    let (user_id, user_email, user_pw) = DEFAULT_USER;
    vec![
        UserRecord::new(admin_id, admin_email, admin_pw, Role::Admin),
        UserRecord::new(user_id, user_email, user_pw, Role::User),
    ]
}

/// (id, category, text, image url, background color)
type SeedCard = (
    &'static str,
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static str,
);

const SEED_CARDS: [SeedCard; 10] = [
    (
        "1",
        "Tarih",
        "Türkiye Cumhuriyeti'nin ilk cumhurbaşkanı kimdir?",
        Some("https://picsum.photos/seed/ataturk/400/200"),
        "#ffffff",
    ),
    (
        "2",
        "Coğrafya",
        "Türkiye'nin en yüksek dağı hangisidir?",
        None,
        "#e0f2fe",
    ),
    (
        "3",
        "Vatandaşlık",
        "Türkiye Büyük Millet Meclisi (TBMM) kaç milletvekilinden oluşur?",
        None,
        "#ede9fe",
    ),
    (
        "4",
        "Güncel Bilgiler",
        "2023 yılında Nobel Edebiyat Ödülü'nü kim kazanmıştır?",
        None,
        "#fef3c7",
    ),
    (
        "5",
        "Spor",
        "2022 FIFA Dünya Kupası'nı hangi ülke kazanmıştır?",
        Some("https://picsum.photos/seed/football/400/200"),
        "#ffffff",
    ),
    (
        "6",
        "Sinema",
        "\"Bir Zamanlar Anadolu'da\" filminin yönetmeni kimdir?",
        None,
        "#d1fae5",
    ),
    (
        "7",
        "Bilim",
        "DNA'nın yapısını keşfeden bilim insanları kimlerdir?",
        Some("https://picsum.photos/seed/dna/400/200"),
        "#ffffff",
    ),
    (
        "8",
        "Teknoloji",
        "Türkiye'nin ilk yerli otomobilinin adı nedir?",
        None,
        "#fee2e2",
    ),
    (
        "9",
        "Tarih",
        "İstanbul'un Fethi hangi tarihte gerçekleşmiştir?",
        None,
        "#fce7f3",
    ),
    (
        "10",
        "Coğrafya",
        "Türkiye'nin en büyük gölü hangisidir?",
        Some("https://picsum.photos/seed/lake/400/200"),
        "#ffffff",
    ),
];

/// Ten cards over eight labels; Edebiyat and Sanat start empty.
pub fn default_cards() -> Vec<Card> {
    SEED_CARDS
        .iter()
        .map(|(id, category, text, image_url, color)| Card {
            id: id.to_string(),
            category: category.to_string(),
            text: text.to_string(),
            image_url: image_url.map(str::to_string),
            background_color: Some(color.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeds_one_admin_and_one_user() {
        let users = default_users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[1].role, Role::User);
    }

    #[test]
    fn seeds_ten_cards_over_eight_categories() {
        let cards = default_cards();
        assert_eq!(cards.len(), 10);

        let ids: HashSet<_> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 10);

        let labels: HashSet<_> = cards.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(labels.len(), 8);
    }
}
