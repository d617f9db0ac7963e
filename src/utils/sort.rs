use sea_orm::Order;

/// Sort fields accepted for hidden gem listings. Anything outside the
/// allow-list silently falls back to `CreatedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GemSortField {
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
    StateName,
    NearestCity,
    BestTimeToVisit,
    DifficultyLevel,
}

impl GemSortField {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("id") => GemSortField::Id,
            Some("name") => GemSortField::Name,
            Some("createdAt") => GemSortField::CreatedAt,
            Some("updatedAt") => GemSortField::UpdatedAt,
            Some("state.name") => GemSortField::StateName,
            Some("nearestCity") => GemSortField::NearestCity,
            Some("bestTimeToVisit") => GemSortField::BestTimeToVisit,
            Some("difficultyLevel") => GemSortField::DifficultyLevel,
            _ => GemSortField::CreatedAt,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            GemSortField::Id => "id",
            GemSortField::Name => "name",
            GemSortField::CreatedAt => "createdAt",
            GemSortField::UpdatedAt => "updatedAt",
            GemSortField::StateName => "state.name",
            GemSortField::NearestCity => "nearestCity",
            GemSortField::BestTimeToVisit => "bestTimeToVisit",
            GemSortField::DifficultyLevel => "difficultyLevel",
        }
    }
}

/// Sort fields accepted for bookmark listings, default `BookmarkedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkSortField {
    BookmarkedAt,
    GemName,
    GemCreatedAt,
}

impl BookmarkSortField {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("bookmarkedAt") => BookmarkSortField::BookmarkedAt,
            Some("hiddenGem.name") => BookmarkSortField::GemName,
            Some("hiddenGem.createdAt") => BookmarkSortField::GemCreatedAt,
            _ => BookmarkSortField::BookmarkedAt,
        }
    }
}

/// Parse a sort direction, defaulting to descending for anything that is not
/// "asc" or "desc" (case-insensitive).
pub fn sort_direction(param: Option<&str>) -> Order {
    match param {
        Some(dir) if dir.eq_ignore_ascii_case("asc") => Order::Asc,
        Some(dir) if dir.eq_ignore_ascii_case("desc") => Order::Desc,
        _ => Order::Desc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sort_field_defaults_to_created_at() {
        assert_eq!(GemSortField::from_param(Some("bogus")), GemSortField::CreatedAt);
        assert_eq!(GemSortField::from_param(Some("bogus")).as_param(), "createdAt");
        assert_eq!(GemSortField::from_param(None), GemSortField::CreatedAt);
    }

    #[test]
    fn test_allowed_sort_fields_pass_through() {
        assert_eq!(GemSortField::from_param(Some("name")), GemSortField::Name);
        assert_eq!(GemSortField::from_param(Some("state.name")), GemSortField::StateName);
        assert_eq!(
            GemSortField::from_param(Some("difficultyLevel")),
            GemSortField::DifficultyLevel
        );
    }

    #[test]
    fn test_invalid_sort_direction_defaults_to_desc() {
        assert_eq!(sort_direction(Some("UP")), Order::Desc);
        assert_eq!(sort_direction(None), Order::Desc);
    }

    #[test]
    fn test_sort_direction_case_insensitive() {
        assert_eq!(sort_direction(Some("ASC")), Order::Asc);
        assert_eq!(sort_direction(Some("asc")), Order::Asc);
        assert_eq!(sort_direction(Some("Desc")), Order::Desc);
    }

    #[test]
    fn test_bookmark_sort_field_defaults() {
        assert_eq!(
            BookmarkSortField::from_param(Some("hiddenGem.name")),
            BookmarkSortField::GemName
        );
        assert_eq!(
            BookmarkSortField::from_param(Some("seats")),
            BookmarkSortField::BookmarkedAt
        );
    }
}
