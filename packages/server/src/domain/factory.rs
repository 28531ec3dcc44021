//! Domain factories for creating domain entities and value objects.

use super::UserId;

/// Factory for generating UserId instances.
///
/// This factory encapsulates the logic for generating new participant
/// identifiers, separating the generation concern from the validation logic
/// in UserId.
pub struct UserIdFactory;

impl UserIdFactory {
    /// Generate a new UserId with a random UUID v4.
    pub fn generate() -> UserId {
        UserId::from_uuid(uuid::Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_factory_generate() {
        // テスト項目: UserIdFactory::generate() で UUID v4 形式の UserId を生成できる
        // when (操作):
        let user_id = UserIdFactory::generate();

        // then (期待する結果):
        let id_str = user_id.as_str();
        assert_eq!(id_str.len(), 36); // UUID v4 の標準長（ハイフン含む）
        assert!(uuid::Uuid::parse_str(id_str).is_ok());
    }

    #[test]
    fn test_user_id_factory_generate_uniqueness() {
        // テスト項目: UserIdFactory::generate() は毎回異なる ID を生成する
        let user_id1 = UserIdFactory::generate();
        let user_id2 = UserIdFactory::generate();
        assert_ne!(user_id1, user_id2);
    }
}
