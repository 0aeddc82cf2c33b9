// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use divvy::application::HouseholdService;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(HouseholdService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = HouseholdService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Standard two-person household used by most scenarios
pub async fn alice_and_bob(service: &HouseholdService) -> Result<()> {
    service.add_roommate("Alice").await?;
    service.add_roommate("Bob").await?;
    Ok(())
}
