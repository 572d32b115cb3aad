use std::cell::RefCell;
use std::rc::Rc;
use taskboard_core::{
    AppError, Board, BoardObserver, EditorMode, EditorSession, Intent, IntentOutcome, SaveOutcome,
    SessionError, TaskBoardApp, TaskId, TaskPriority, TaskStatus, TaskValidationError,
};

#[derive(Default)]
struct Recorded {
    boards: Vec<Board>,
    session_modes: Vec<EditorMode>,
}

struct RecordingObserver(Rc<RefCell<Recorded>>);

impl BoardObserver for RecordingObserver {
    fn board_changed(&mut self, board: &Board) {
        self.0.borrow_mut().boards.push(board.clone());
    }

    fn session_changed(&mut self, session: &EditorSession) {
        self.0.borrow_mut().session_modes.push(session.mode());
    }
}

fn recorded_app() -> (TaskBoardApp, Rc<RefCell<Recorded>>) {
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let mut app = TaskBoardApp::seeded();
    app.subscribe(Box::new(RecordingObserver(Rc::clone(&recorded))));
    (app, recorded)
}

#[test]
fn deleting_seed_task_empties_todo_only() {
    let mut app = TaskBoardApp::seeded();
    let before = app.board().clone();

    assert!(app.request_delete_task(&TaskId::parse("1").unwrap()));

    assert!(app.board().column(TaskStatus::Todo).unwrap().tasks.is_empty());
    for status in [TaskStatus::InProgress, TaskStatus::Review, TaskStatus::Done] {
        assert_eq!(app.board().column(status), before.column(status));
    }
}

#[test]
fn add_in_progress_task_through_editor() {
    let mut app = TaskBoardApp::seeded();

    app.request_add_task(TaskStatus::InProgress);
    assert!(app.update_draft_field_str("title", "Write tests").unwrap());
    let outcome = app.request_save().unwrap();

    let column = app.board().column(TaskStatus::InProgress).unwrap();
    assert_eq!(column.tasks.len(), 1);
    let task = &column.tasks[0];
    assert_eq!(task.title, "Write tests");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert!(!task.id.as_str().is_empty());
    assert_ne!(task.id.as_str(), "1");
    assert_eq!(outcome, SaveOutcome::Created(task.id.clone()));
    assert!(!app.session().is_open());
}

#[test]
fn saving_empty_title_keeps_board_and_session() {
    let mut app = TaskBoardApp::seeded();
    let before = app.board().clone();

    app.request_add_task(TaskStatus::Todo);
    let err = app.request_save().unwrap_err();

    assert_eq!(
        err,
        AppError::Session(SessionError::Validation(TaskValidationError::EmptyTitle))
    );
    assert_eq!(app.board(), &before);
    assert!(app.session().is_open());
    assert_eq!(app.session().mode(), EditorMode::New);
}

#[test]
fn edit_then_save_without_changes_is_lossless() {
    let mut app = TaskBoardApp::seeded();
    let before = app.board().clone();
    let task = before.columns[0].tasks[0].clone();

    app.request_edit_task(&task);
    assert_eq!(app.session().heading(), Some("Edit Task"));
    let outcome = app.request_save().unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Updated {
            task_id: task.id.clone(),
            matched: true
        }
    );
    assert_eq!(app.board(), &before);
}

#[test]
fn edit_save_updates_fields_in_place() {
    let mut app = TaskBoardApp::seeded();
    app.request_edit_task_by_id(&TaskId::parse("1").unwrap())
        .unwrap();
    app.update_draft_field_str("priority", "low").unwrap();
    app.update_draft_field_str("assignee", "").unwrap();
    app.update_draft_field_str("dueDate", "2024-03-15").unwrap();
    app.request_save().unwrap();

    let (column, task) = app.board().find_task(&TaskId::parse("1").unwrap()).unwrap();
    assert_eq!(column, TaskStatus::Todo);
    assert_eq!(task.title, "Create ERD Diagram");
    assert_eq!(task.priority, TaskPriority::Low);
    assert_eq!(task.assignee, None);
    assert_eq!(task.due_date.as_deref(), Some("2024-03-15"));
}

#[test]
fn saving_edit_of_deleted_task_is_a_noop() {
    let mut app = TaskBoardApp::seeded();
    let id = TaskId::parse("1").unwrap();
    app.request_edit_task_by_id(&id).unwrap();
    app.request_delete_task(&id);

    let outcome = app.request_save().unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Updated {
            task_id: id,
            matched: false
        }
    );
    assert_eq!(app.board().task_count(), 0);
}

#[test]
fn draft_field_errors_surface_and_closed_session_ignores_updates() {
    let mut app = TaskBoardApp::seeded();
    assert!(!app.update_draft_field_str("title", "ignored").unwrap());

    app.request_add_task(TaskStatus::Done);
    assert!(matches!(
        app.update_draft_field_str("priority", "urgent").unwrap_err(),
        AppError::Draft(_)
    ));
    assert!(matches!(
        app.update_draft_field_str("color", "red").unwrap_err(),
        AppError::Draft(_)
    ));
}

#[test]
fn observers_see_board_only_after_real_changes() {
    let (mut app, recorded) = recorded_app();

    app.dispatch(Intent::DeleteTask(TaskId::parse("missing").unwrap()))
        .unwrap();
    assert!(recorded.borrow().boards.is_empty());

    app.dispatch(Intent::AddTask(TaskStatus::Review)).unwrap();
    app.request_save().unwrap_err();
    assert!(recorded.borrow().boards.is_empty());

    app.update_draft_field_str("title", "Check PR").unwrap();
    let outcome = app.dispatch(Intent::Save).unwrap();
    assert!(matches!(outcome, IntentOutcome::Saved(SaveOutcome::Created(_))));

    let recorded = recorded.borrow();
    assert_eq!(recorded.boards.len(), 1);
    assert_eq!(
        recorded.boards[0]
            .column(TaskStatus::Review)
            .unwrap()
            .tasks
            .len(),
        1
    );
    assert_eq!(
        recorded.session_modes,
        vec![EditorMode::New, EditorMode::New, EditorMode::Closed]
    );
}

#[test]
fn saving_edit_of_deleted_task_does_not_notify_board() {
    let mut app = TaskBoardApp::seeded();
    let id = TaskId::parse("1").unwrap();
    app.request_edit_task_by_id(&id).unwrap();
    app.request_delete_task(&id);

    let recorded = Rc::new(RefCell::new(Recorded::default()));
    app.subscribe(Box::new(RecordingObserver(Rc::clone(&recorded))));
    let before = app.board().clone();

    let outcome = app.request_save().unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Updated {
            task_id: id,
            matched: false
        }
    );
    assert_eq!(app.board(), &before);

    let recorded = recorded.borrow();
    assert!(recorded.boards.is_empty(), "board did not change");
    assert_eq!(recorded.session_modes, vec![EditorMode::Closed]);
}

#[test]
fn dispatch_delete_reports_removal() {
    let mut app = TaskBoardApp::seeded();
    let id = TaskId::parse("1").unwrap();
    assert_eq!(
        app.dispatch(Intent::DeleteTask(id.clone())).unwrap(),
        IntentOutcome::Deleted {
            task_id: id.clone(),
            removed: true
        }
    );
    assert_eq!(
        app.dispatch(Intent::DeleteTask(id.clone())).unwrap(),
        IntentOutcome::Deleted {
            task_id: id,
            removed: false
        }
    );
}
