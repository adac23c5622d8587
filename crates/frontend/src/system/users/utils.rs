use chrono::{DateTime, Utc};
use contracts::system::users::{User, UserRole, UserStatus};

use crate::shared::date_utils::format_datetime;
use crate::shared::export::CsvExportable;

const AVATAR_COLORS: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8"];

const MS_PER_DAY: i64 = 86_400_000;

/// CSS-класс давности последней активности
pub fn activity_class(last_activity: &DateTime<Utc>, now: &DateTime<Utc>) -> &'static str {
    let diff_days = (*now - *last_activity).num_milliseconds().div_euclid(MS_PER_DAY);

    if diff_days < 1 {
        "activity-recent"
    } else if diff_days < 7 {
        "activity-week"
    } else if diff_days < 30 {
        "activity-month"
    } else {
        "activity-old"
    }
}

/// Аватар по умолчанию: SVG data URI с первой буквой имени на цветном фоне
pub fn default_avatar(name: &str) -> String {
    let first = name.chars().next();
    let initial: String = first.map(|c| c.to_uppercase().collect()).unwrap_or_default();
    let color = first
        .map(|c| AVATAR_COLORS[(c as usize) % AVATAR_COLORS.len()])
        .unwrap_or(AVATAR_COLORS[0]);

    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='40' height='40'%3E%3Crect width='40' height='40' fill='{}'/%3E%3Ctext x='50%25' y='50%25' dominant-baseline='middle' text-anchor='middle' font-family='Arial' font-size='20' fill='white'%3E{}%3C/text%3E%3C/svg%3E",
        urlencoding::encode(color),
        urlencoding::encode(&initial)
    )
}

/// Аватар пользователя или сгенерированный по имени
pub fn avatar_src(user: &User) -> String {
    user.avatar
        .clone()
        .unwrap_or_else(|| default_avatar(&user.name))
}

pub fn role_badge_class(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "badge badge--warning",
        UserRole::Moderator => "badge badge--primary",
        UserRole::User => "badge badge--neutral",
    }
}

pub fn status_badge_class(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "badge badge--success",
        UserStatus::Inactive => "badge badge--error",
    }
}

impl CsvExportable for User {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Имя",
            "Email",
            "Роль",
            "Статус",
            "Дата регистрации",
            "Последняя активность",
            "Входов",
            "Публикаций",
            "Комментариев",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.role.display_name().to_string(),
            self.status.display_name().to_string(),
            format_datetime(&self.registration_date),
            format_datetime(&self.last_activity),
            self.login_count.to_string(),
            self.posts_count.to_string(),
            self.comments_count.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_activity_class_thresholds() {
        let now: DateTime<Utc> = "2024-06-30T12:00:00Z".parse().unwrap();
        assert_eq!(activity_class(&(now - Duration::hours(23)), &now), "activity-recent");
        assert_eq!(activity_class(&(now - Duration::days(1)), &now), "activity-week");
        assert_eq!(activity_class(&(now - Duration::days(6)), &now), "activity-week");
        assert_eq!(activity_class(&(now - Duration::days(7)), &now), "activity-month");
        assert_eq!(activity_class(&(now - Duration::days(29)), &now), "activity-month");
        assert_eq!(activity_class(&(now - Duration::days(30)), &now), "activity-old");
        assert_eq!(activity_class(&(now + Duration::days(2)), &now), "activity-recent");
    }

    #[test]
    fn test_default_avatar() {
        // 'A' = 65, 65 % 5 = 0
        let avatar = default_avatar("Anna");
        assert!(avatar.starts_with("data:image/svg+xml,"));
        assert!(avatar.contains("fill='%23FF6B6B'"));
        assert!(avatar.contains("%3EA%3C/text%3E"));

        // 'и' = 1080, 1080 % 5 = 0; the initial is percent-encoded as UTF-8
        let avatar = default_avatar("иван");
        assert!(avatar.contains("%3E%D0%98%3C/text%3E"));

        // reserved characters must not break the data URI
        assert!(default_avatar("#tag").contains("%3E%23%3C/text%3E"));
        assert!(default_avatar("%admin").contains("%3E%25%3C/text%3E"));
        assert!(default_avatar("<script>").contains("%3E%3C%3C/text%3E"));

        // 'B' = 66 -> second colour, 'a' = 97 -> third
        assert!(default_avatar("Boris").contains("fill='%234ECDC4'"));
        assert!(default_avatar("anna").contains("fill='%2345B7D1'"));
        assert!(default_avatar("").contains("fill='%23FF6B6B'"));
    }

    #[test]
    fn test_csv_row_matches_headers() {
        let user = User {
            id: "42".to_string(),
            name: "Иван Петров 1".to_string(),
            email: "user1@example.com".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            registration_date: "2020-03-15T00:00:00Z".parse().unwrap(),
            last_activity: "2024-03-15T14:02:26Z".parse().unwrap(),
            avatar: None,
            login_count: 5,
            posts_count: 1,
            comments_count: 2,
        };

        let row = user.to_csv_row();
        assert_eq!(row.len(), User::headers().len());
        assert_eq!(row[3], "Администратор");
        assert_eq!(row[6], "15.03.2024 14:02:26");
        assert_eq!(avatar_src(&user), default_avatar("Иван Петров 1"));
    }
}
