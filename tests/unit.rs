//! Unit tests for the verb registry and error messages.
use callflow::error::BranchRejection;
use callflow::prelude::*;
use callflow::verb::{is_known, role_of};

#[test]
fn test_verb_roles() {
    assert_eq!(role_of("accept"), Ok(Role::Entry));
    assert_eq!(role_of("hangup"), Ok(Role::Terminal));
    for verb in ["play", "playDtmf", "say", "gather", "dial", "record", "mute", "unmute"] {
        assert_eq!(role_of(verb), Ok(Role::Branching), "verb {}", verb);
    }
    assert_eq!(Verb::ALL.len(), 10);
}

#[test]
fn test_unknown_verb() {
    assert_eq!(
        role_of("transfer"),
        Err(FlowError::UnknownVerb("transfer".to_string()))
    );
    assert!(!is_known("transfer"));
    assert!(!is_known("Accept"));
    assert!(is_known("playDtmf"));
}

#[test]
fn test_verb_labels() {
    assert_eq!(Verb::Dial.display_name(), "Dial/Bridge");
    assert_eq!(Verb::Say.display_name(), "Say (TTS)");
    assert_eq!(Verb::Gather.default_label(), "GATHER");
    assert_eq!(format!("{}", Verb::PlayDtmf), "playDtmf");
}

#[test]
fn test_error_display() {
    let err = FlowError::InvalidBranch {
        source_id: "5".to_string(),
        target_id: "2".to_string(),
        branch: Branch::Success,
        reason: BranchRejection::FromTerminal,
    };
    let text = err.to_string();
    assert!(text.contains("'5'"));
    assert!(text.contains("'2'"));
    assert!(text.contains("success"));
    assert!(text.contains("terminal"));

    let err = GenerationError::Parse {
        raw: "{".to_string(),
        message: "EOF while parsing an object".to_string(),
    };
    assert!(err.to_string().contains("EOF while parsing"));

    let err = EditError::ParamsParse {
        node_id: "3".to_string(),
        message: "expected value".to_string(),
    };
    assert!(err.to_string().contains("parameters of node '3'"));
}

#[test]
fn test_branch_handles() {
    assert_eq!(Branch::from_handle(None), Some(Branch::Default));
    assert_eq!(Branch::from_handle(Some("success")), Some(Branch::Success));
    assert_eq!(Branch::from_handle(Some("failure")), Some(Branch::Failure));
    assert_eq!(Branch::from_handle(Some("input")), None);
    assert_eq!(Branch::Default.handle(), None);
    assert_eq!(Branch::Failure.handle(), Some("failure"));
}
