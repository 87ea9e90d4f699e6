use vitrex_domain::id::AgentId;
use vitrex_leads::error::LeadsServiceError;
use vitrex_leads::usecase::agent::{
    CreateAgentInput, CreateAgentUseCase, DeleteAgentUseCase, ListAgentsUseCase, UpdateAgentInput,
    UpdateAgentUseCase,
};

use crate::helpers::{MockAgentRepo, test_agent};

fn create_input(email: &str) -> CreateAgentInput {
    CreateAgentInput {
        name: "  Sophie Laurent ".to_owned(),
        email: email.to_owned(),
        phone: Some(" ".to_owned()),
    }
}

#[tokio::test]
async fn should_create_active_agent_with_generated_code() {
    let agents = MockAgentRepo::empty();
    let stored = agents.agents_handle();
    let uc = CreateAgentUseCase { agents };

    let agent = uc
        .execute(create_input("Sophie.Laurent@Example.fr"))
        .await
        .unwrap();

    assert!(agent.active);
    assert_eq!(agent.name, "Sophie Laurent");
    assert_eq!(agent.email, "sophie.laurent@example.fr");
    assert_eq!(agent.phone, None);
    assert!(agent.referral_code.as_str().starts_with("AG-"));
    assert_eq!(stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_retry_when_code_is_claimed_concurrently() {
    let agents = MockAgentRepo::with_insert_conflicts(2);
    let stored = agents.agents_handle();
    let uc = CreateAgentUseCase { agents };

    let agent = uc.execute(create_input("sophie@example.fr")).await.unwrap();

    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].referral_code, agent.referral_code);
}

#[tokio::test]
async fn should_give_up_when_every_insert_conflicts() {
    let agents = MockAgentRepo::with_insert_conflicts(u32::MAX);
    let exists_calls = agents.exists_calls.clone();
    let uc = CreateAgentUseCase { agents };

    let result = uc.execute(create_input("sophie@example.fr")).await;

    assert!(
        matches!(result, Err(LeadsServiceError::GenerationExhausted)),
        "expected GenerationExhausted, got {result:?}"
    );
    assert_eq!(*exists_calls.lock().unwrap(), 20);
}

#[tokio::test]
async fn should_bound_lookups_when_every_code_collides() {
    let agents = MockAgentRepo::all_codes_taken();
    let exists_calls = agents.exists_calls.clone();
    let stored = agents.agents_handle();
    let uc = CreateAgentUseCase { agents };

    let result = uc.execute(create_input("sophie@example.fr")).await;

    assert!(
        matches!(result, Err(LeadsServiceError::GenerationExhausted)),
        "expected GenerationExhausted, got {result:?}"
    );
    assert_eq!(*exists_calls.lock().unwrap(), 20);
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_invalid_agent_fields() {
    let uc = CreateAgentUseCase {
        agents: MockAgentRepo::empty(),
    };

    let result = uc
        .execute(CreateAgentInput {
            name: "S".to_owned(),
            email: "sophie".to_owned(),
            phone: Some("12".to_owned()),
        })
        .await;

    match result {
        Err(LeadsServiceError::InvalidPayload(e)) => {
            assert!(e.fields.contains("name"));
            assert!(e.fields.contains("email"));
            assert!(e.fields.contains("phone"));
        }
        other => panic!("expected InvalidPayload, got {other:?}"),
    }
}

#[tokio::test]
async fn should_reject_duplicate_agent_email() {
    let existing = test_agent("AG-7K2QD", true);
    let uc = CreateAgentUseCase {
        agents: MockAgentRepo::new(vec![existing.clone()]),
    };

    let result = uc.execute(create_input(&existing.email)).await;

    assert!(matches!(result, Err(LeadsServiceError::AgentEmailTaken)));
}

#[tokio::test]
async fn should_deactivate_agent_and_keep_code() {
    let agent = test_agent("AG-7K2QD", true);
    let uc = UpdateAgentUseCase {
        agents: MockAgentRepo::new(vec![agent.clone()]),
    };

    let updated = uc
        .execute(
            agent.id,
            UpdateAgentInput {
                active: Some(false),
                phone: Some(Some("06 11 22 33 44".to_owned())),
                ..UpdateAgentInput::default()
            },
        )
        .await
        .unwrap();

    assert!(!updated.active);
    assert_eq!(updated.phone.as_deref(), Some("06 11 22 33 44"));
    assert_eq!(updated.referral_code, agent.referral_code);
}

#[tokio::test]
async fn should_clear_phone_with_explicit_null() {
    let mut agent = test_agent("AG-7K2QD", true);
    agent.phone = Some("06 11 22 33 44".to_owned());
    let uc = UpdateAgentUseCase {
        agents: MockAgentRepo::new(vec![agent.clone()]),
    };

    let updated = uc
        .execute(
            agent.id,
            UpdateAgentInput {
                phone: Some(None),
                ..UpdateAgentInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.phone, None);
}

#[tokio::test]
async fn should_reject_empty_update() {
    let agent = test_agent("AG-7K2QD", true);
    let uc = UpdateAgentUseCase {
        agents: MockAgentRepo::new(vec![agent.clone()]),
    };

    let result = uc.execute(agent.id, UpdateAgentInput::default()).await;

    assert!(matches!(result, Err(LeadsServiceError::MissingData)));
}

#[tokio::test]
async fn should_list_and_delete_agents() {
    let agent = test_agent("AG-7K2QD", true);
    let agents = MockAgentRepo::new(vec![agent.clone(), test_agent("AG-AAAAA", false)]);

    let listed = ListAgentsUseCase {
        agents: agents.clone(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(listed.len(), 2);

    let delete = DeleteAgentUseCase { agents };
    delete.execute(agent.id).await.unwrap();
    let missing = delete.execute(AgentId::generate()).await;
    assert!(
        matches!(missing, Err(LeadsServiceError::AgentNotFound)),
        "expected AgentNotFound, got {missing:?}"
    );
}
