use parley_session::{
    Attachment, AttachmentKind, ChatStore, SessionError, Turn, TurnRole, NEW_CHAT_TITLE,
};

#[derive(Debug, Clone, Copy)]
enum Action {
    Create,
    RenameActive(&'static str),
    DeleteActive,
    DeleteFirst,
    SelectFirst,
}

fn apply(store: &mut ChatStore, action: Action) {
    match action {
        Action::Create => {
            store.create_session();
        }
        Action::RenameActive(title) => {
            let active = store.active_title().to_string();
            // Collisions are refused; either outcome keeps the store consistent
            let _ = store.rename_session(&active, title);
        }
        Action::DeleteActive => {
            let active = store.active_title().to_string();
            store.delete_session(&active).unwrap();
        }
        Action::DeleteFirst => {
            let first = store.sessions().next().unwrap().title().to_string();
            store.delete_session(&first).unwrap();
        }
        Action::SelectFirst => {
            let first = store.sessions().next().unwrap().title().to_string();
            store.select(&first).unwrap();
        }
    }
}

#[test]
fn test_active_selection_never_dangles() {
    let script = [
        Action::RenameActive("alpha"),
        Action::Create,
        Action::RenameActive("beta"),
        Action::Create,
        Action::SelectFirst,
        Action::DeleteFirst,
        Action::RenameActive("gamma"),
        Action::DeleteActive,
        Action::Create,
        Action::RenameActive("beta"),
        Action::DeleteFirst,
        Action::DeleteFirst,
        Action::DeleteActive,
        Action::SelectFirst,
        Action::DeleteActive,
    ];

    let mut store = ChatStore::default();
    for action in script {
        apply(&mut store, action);
        let active = store.active_title().to_string();
        assert!(store.contains(&active), "dangling selection after {action:?}");
        assert!(!store.is_empty());

        let new_chats = store.sessions().filter(|s| s.title() == NEW_CHAT_TITLE).count();
        assert!(new_chats <= 1, "duplicate New Chat after {action:?}");
    }
}

#[test]
fn test_delete_active_restores_single_new_chat() {
    let mut store = ChatStore::default();
    store.append_turn(NEW_CHAT_TITLE, Turn::user("hello")).unwrap();
    store.rename_session(NEW_CHAT_TITLE, "hello").unwrap();
    store.create_session();
    store.append_turn(NEW_CHAT_TITLE, Turn::user("unsent draft")).unwrap();
    store.select("hello").unwrap();

    store.delete_session("hello").unwrap();

    assert_eq!(store.active_title(), NEW_CHAT_TITLE);
    let new_chats: Vec<_> = store.sessions().filter(|s| s.title() == NEW_CHAT_TITLE).collect();
    assert_eq!(new_chats.len(), 1);
    assert_eq!(new_chats[0].len(), 1);
    assert_eq!(new_chats[0].turns()[0].role(), TurnRole::Assistant);
}

#[test]
fn test_delete_inactive_keeps_selection() {
    let mut store = ChatStore::default();
    store.rename_session(NEW_CHAT_TITLE, "keep me").unwrap();
    store.create_session();
    store.rename_session(NEW_CHAT_TITLE, "drop me").unwrap();
    store.select("keep me").unwrap();

    store.delete_session("drop me").unwrap();

    assert_eq!(store.active_title(), "keep me");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_delete_missing_is_not_found() {
    let mut store = ChatStore::default();
    assert!(matches!(
        store.delete_session("ghost"),
        Err(SessionError::NotFound(_))
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_delete_drops_uploads() {
    let mut store = ChatStore::default();
    store.attach(&Attachment::pdf("notes.pdf", "text", 1)).unwrap();
    store.rename_session(NEW_CHAT_TITLE, "with files").unwrap();

    store.delete_session("with files").unwrap();

    assert!(store.active().uploads().is_empty());
}

#[test]
fn test_rename_noops() {
    let mut store = ChatStore::default();
    assert!(!store.rename_session(NEW_CHAT_TITLE, "").unwrap());
    assert!(!store.rename_session(NEW_CHAT_TITLE, "   ").unwrap());
    assert!(!store.rename_session(NEW_CHAT_TITLE, NEW_CHAT_TITLE).unwrap());
    assert_eq!(store.active_title(), NEW_CHAT_TITLE);
}

#[test]
fn test_rename_moves_turns_and_uploads() {
    let mut store = ChatStore::default();
    store.append_turn(NEW_CHAT_TITLE, Turn::user("one")).unwrap();
    store.attach(&Attachment::image("cat.png", 2, 2)).unwrap();
    let before: Vec<Turn> = store.active().turns().to_vec();

    assert!(store.rename_session(NEW_CHAT_TITLE, "Pets").unwrap());

    assert!(!store.contains(NEW_CHAT_TITLE));
    assert_eq!(store.active_title(), "Pets");
    let renamed = store.session("Pets").unwrap();
    assert_eq!(renamed.turns(), before.as_slice());
    assert_eq!(renamed.uploads().get(AttachmentKind::Image), ["cat.png"]);
}

#[test]
fn test_rename_onto_existing_title_is_refused() {
    let mut store = ChatStore::default();
    store.rename_session(NEW_CHAT_TITLE, "taken").unwrap();
    store.create_session();

    let err = store.rename_session(NEW_CHAT_TITLE, "taken").unwrap_err();

    assert!(matches!(err, SessionError::TitleTaken(t) if t == "taken"));
    assert!(store.contains(NEW_CHAT_TITLE));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_rename_missing_is_not_found() {
    let mut store = ChatStore::default();
    assert!(matches!(
        store.rename_session("ghost", "spirit"),
        Err(SessionError::NotFound(_))
    ));
}

#[test]
fn test_append_is_strictly_additive() {
    let mut store = ChatStore::default();
    let mut snapshot: Vec<Turn> = store.active().turns().to_vec();

    for text in ["a", "b", "c"] {
        store.append_turn(NEW_CHAT_TITLE, Turn::user(text)).unwrap();
        let now = store.active().turns();
        assert_eq!(now.len(), snapshot.len() + 1);
        assert_eq!(&now[..snapshot.len()], snapshot.as_slice());
        assert_eq!(now.last().unwrap().content(), text);
        snapshot = now.to_vec();
    }
}

#[test]
fn test_append_to_missing_chat() {
    let mut store = ChatStore::default();
    assert!(matches!(
        store.append_turn("ghost", Turn::user("boo")),
        Err(SessionError::NotFound(_))
    ));
    assert_eq!(store.active().len(), 1);
}

#[test]
fn test_derive_title_examples() {
    let mut store = ChatStore::default();
    assert_eq!(store.derive_title("Hello world\nmore text"), "Hello world");

    store.rename_session(NEW_CHAT_TITLE, "Hello world").unwrap();
    assert_eq!(store.derive_title("Hello world\nmore text"), "Hello world (1)");
}

#[test]
fn test_pdf_upload_of_1500_chars() {
    let mut store = ChatStore::default();
    let text: String = ('a'..='z').cycle().take(1500).collect();

    let turn = store.attach(&Attachment::pdf("long.pdf", text.clone(), 3)).unwrap();

    let preview: String = text.chars().take(1000).collect();
    assert_eq!(turn.role(), TurnRole::User);
    assert!(turn.content().contains(&format!("{}...", preview)));
    assert!(!turn.content().contains(&text[..1001]));
    assert_eq!(store.active().uploads().get(AttachmentKind::Pdf), ["long.pdf"]);
}

#[test]
fn test_select_missing_is_not_found() {
    let mut store = ChatStore::default();
    assert!(matches!(store.select("ghost"), Err(SessionError::NotFound(_))));
    assert_eq!(store.active_title(), NEW_CHAT_TITLE);
}
