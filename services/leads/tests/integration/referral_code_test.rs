use vitrex_leads::error::LeadsServiceError;
use vitrex_leads::usecase::referral_code::GenerateReferralCodeUseCase;

use crate::helpers::{MockAgentRepo, test_agent};

#[tokio::test]
async fn should_generate_well_formed_unused_code() {
    let agents = MockAgentRepo::new(vec![test_agent("AG-7K2QD", true)]);
    let calls = agents.exists_calls.clone();
    let uc = GenerateReferralCodeUseCase { agents };

    let code = uc.execute().await.unwrap();

    let s = code.as_str();
    assert_eq!(s.len(), 8);
    assert!(s.starts_with("AG-"));
    assert!(
        s[3..]
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()),
        "suffix should be uppercase alphanumeric, got {s}"
    );
    assert_ne!(s, "AG-7K2QD");
    assert!(*calls.lock().unwrap() >= 1);
}

#[tokio::test]
async fn should_give_up_after_twenty_collisions() {
    let agents = MockAgentRepo::all_codes_taken();
    let calls = agents.exists_calls.clone();
    let uc = GenerateReferralCodeUseCase { agents };

    let result = uc.execute().await;

    assert!(
        matches!(result, Err(LeadsServiceError::GenerationExhausted)),
        "expected GenerationExhausted, got {result:?}"
    );
    assert_eq!(*calls.lock().unwrap(), 20);
}
