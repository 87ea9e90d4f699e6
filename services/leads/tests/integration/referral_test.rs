use vitrex_leads::usecase::referral::ResolveReferralUseCase;

use crate::helpers::{MockAgentRepo, test_agent};

#[tokio::test]
async fn should_resolve_active_agent_code() {
    let agent = test_agent("AG-7K2QD", true);
    let uc = ResolveReferralUseCase {
        agents: MockAgentRepo::new(vec![agent.clone()]),
    };

    let resolved = uc.execute(Some("AG-7K2QD")).await.unwrap();

    assert_eq!(resolved.map(|a| a.id), Some(agent.id));
}

#[tokio::test]
async fn should_ignore_surrounding_whitespace() {
    let agent = test_agent("AG-7K2QD", true);
    let uc = ResolveReferralUseCase {
        agents: MockAgentRepo::new(vec![agent.clone()]),
    };

    let resolved = uc.execute(Some("  AG-7K2QD ")).await.unwrap();

    assert_eq!(resolved.map(|a| a.id), Some(agent.id));
}

#[tokio::test]
async fn should_require_exact_case_match() {
    let uc = ResolveReferralUseCase {
        agents: MockAgentRepo::new(vec![test_agent("AG-7K2QD", true)]),
    };

    for code in ["ag-7k2qd", "Ag-7K2QD", "AG-7k2qd"] {
        assert!(
            uc.execute(Some(code)).await.unwrap().is_none(),
            "{code:?} should not resolve"
        );
    }
}

#[tokio::test]
async fn should_not_resolve_inactive_agent() {
    let uc = ResolveReferralUseCase {
        agents: MockAgentRepo::new(vec![test_agent("AG-7K2QD", false)]),
    };

    assert!(uc.execute(Some("AG-7K2QD")).await.unwrap().is_none());
}

#[tokio::test]
async fn should_treat_unknown_blank_and_malformed_codes_as_absent() {
    let uc = ResolveReferralUseCase {
        agents: MockAgentRepo::new(vec![test_agent("AG-7K2QD", true)]),
    };

    for code in [None, Some(""), Some("   "), Some("AG-ZZZZZ"), Some("not a code")] {
        assert!(
            uc.execute(code).await.unwrap().is_none(),
            "{code:?} should not resolve"
        );
    }
}
