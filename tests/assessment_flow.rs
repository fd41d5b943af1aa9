use std::sync::Arc;

use pretty_assertions::assert_eq;
use vanguard_rs_assessment::core::errors::{AssessmentError, SimulationError};
use vanguard_rs_assessment::core::knowledge_base;
use vanguard_rs_assessment::core::models::{Question, RiskLevel, Severity, Stage};
use vanguard_rs_assessment::{compute_composite, AssessmentSession, ImpactSimulationEngine, Questionnaire};

fn stages_a_b() -> Arc<Questionnaire> {
    let stages = vec![
        Stage::new(
            "A",
            "two questions",
            vec![
                Question::new("a_first", "First?", &["Yes", "No"]),
                Question::new("a_second", "Second?", &["Yes", "No"]),
            ],
        ),
        Stage::new("B", "one question", vec![Question::new("b_only", "Third?", &["Yes", "No"])]),
    ];
    Arc::new(Questionnaire::new(stages).unwrap())
}

#[test]
fn two_stage_walkthrough_completes() {
    let mut session = AssessmentSession::new(stages_a_b());

    session.answer("a_first", "Yes").unwrap();
    session.answer("a_second", "No").unwrap();
    assert!(session.is_current_stage_complete());
    assert_eq!(session.progress_percentage(), 67);

    session.advance().unwrap();
    assert_eq!(session.current_stage_index(), 1);
    assert_eq!(session.current_stage().title, "B");

    session.answer("b_only", "Yes").unwrap();
    session.advance().unwrap();
    assert!(session.is_completed());
    assert_eq!(session.advance(), Err(AssessmentError::AlreadyComplete));
}

#[test]
fn reference_questionnaire_end_to_end() {
    let questionnaire = Arc::new(Questionnaire::new(knowledge_base::default_stages()).unwrap());
    let mut session = AssessmentSession::new(Arc::clone(&questionnaire));

    for stage in questionnaire.stages() {
        assert_eq!(session.advance(), Err(AssessmentError::StageIncomplete {
            stage_index: session.current_stage_index(),
            missing: stage.questions.len(),
        }));
        for question in &stage.questions {
            session.answer(&question.id, &question.options[0]).unwrap();
        }
        session.advance().unwrap();
    }

    assert!(session.is_completed());
    assert_eq!(session.progress_percentage(), 100);
    assert_eq!(session.answers().len(), 11);
    assert_eq!(session.answer_for("mfa_enabled"), Some("Yes, all admins"));
}

#[test]
fn reference_risk_factors_are_medium_risk() {
    let result = compute_composite(&knowledge_base::reference_risk_factors(), Some(57)).unwrap();
    assert_eq!(result.score, 61);
    assert_eq!(result.level, RiskLevel::Medium);
    assert_eq!(result.delta, Some(4));
    assert_eq!(
        result.per_category.iter().map(|c| c.category.as_str()).collect::<Vec<_>>(),
        vec![
            "Network Security",
            "Access Management",
            "Endpoint Protection",
            "Data Protection",
            "Security Awareness",
            "Incident Response",
        ]
    );
}

#[test]
fn every_sample_vulnerability_simulates_to_the_end() {
    let engine = ImpactSimulationEngine::new();
    for vulnerability in knowledge_base::sample_vulnerabilities() {
        let mut state = engine.open(&vulnerability).unwrap();
        let last = state.step_count() - 1;
        for _ in 0..last {
            state.advance().unwrap();
        }
        assert_eq!(state.current_step(), last);
        assert_eq!(state.advance(), Err(SimulationError::AtFinalStep(last)));
        state.reset();
        assert_eq!(state.current_step(), 0);
    }
}

#[test]
fn severity_tiers_map_to_distinct_scenarios() {
    let engine = ImpactSimulationEngine::new();
    let first_titles: Vec<_> = [Severity::Critical, Severity::High, Severity::Medium]
        .into_iter()
        .map(|s| engine.scenario(s).unwrap()[0].title.clone())
        .collect();
    assert_eq!(first_titles, vec!["Exploitation", "Initial Breach", "Reconnaissance"]);
}
