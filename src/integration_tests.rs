#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use crate::actor_framework::{FrameworkError, ResourceRequest};
    use crate::clients::{FormClient, UserClient};
    use crate::domain::{User, UserField};
    use crate::form_actor::{ErrorMap, FormService, FormSnapshot, Rule, SubmitOutcome, UserSchema, Violation};
    use crate::mock_framework::{create_mock_client, expect_update};

    /// Mounts a form on `initial` against a mock user store.
    fn mount(initial: User) -> (FormClient, mpsc::Receiver<ResourceRequest<User>>) {
        let (inner, store_rx) = create_mock_client::<User>(10);
        let (service, form) = FormService::new(10, initial, UserClient::new(inner));
        tokio::spawn(service.run());
        (form, store_rx)
    }

    async fn wait_for_snapshot(form: &FormClient, done: impl Fn(&FormSnapshot) -> bool) -> FormSnapshot {
        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                let snapshot = form.snapshot().await.unwrap();
                if done(&snapshot) {
                    return snapshot;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("form did not reach the expected state")
    }

    fn errors(entries: &[(UserField, &str)]) -> ErrorMap {
        ErrorMap::from_violations(entries.iter().map(|(field, message)| Violation {
            path: Some(*field),
            message: message.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_missing_first_name_blocks_update() {
        let (form, mut store_rx) = mount(User::new("", "Doe", "a@b.com").with_id(1));

        let outcome = form.submit().await.unwrap();
        let expected = errors(&[(UserField::FirstName, "First name is required")]);
        assert_eq!(outcome, SubmitOutcome::Invalid(expected.clone()));
        assert_eq!(form.snapshot().await.unwrap().errors, expected);
        assert!(store_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_each_missing_field_reports_required_message() {
        let cases = [
            (UserField::FirstName, "First name is required"),
            (UserField::LastName, "Last name is required"),
            (UserField::Email, "Email is required"),
        ];
        for (field, message) in cases {
            let mut user = User::new("Jane", "Doe", "jane@x.com").with_id(1);
            user.set_field(field, "");
            let (form, mut store_rx) = mount(user);

            let outcome = form.submit().await.unwrap();
            assert_eq!(outcome, SubmitOutcome::Invalid(errors(&[(field, message)])));
            assert!(store_rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_malformed_email_reports_format_error_only() {
        let (form, mut store_rx) = mount(User::new("Jane", "Doe", "not-an-email").with_id(1));

        let outcome = form.submit().await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid(errors(&[(UserField::Email, "Must be in email format")]))
        );
        assert!(store_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_valid_existing_record_updates_once_and_takes_response() {
        let user = User::new("Jane", "Doe", "jane@x.com").with_id(1);
        let (form, mut store_rx) = mount(user.clone());

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Dispatched);
        assert!(form.snapshot().await.unwrap().errors.is_empty());

        let (id, patch, responder) = expect_update(&mut store_rx).await.expect("Expected Update request");
        assert_eq!(id, 1);
        assert_eq!(patch, user);

        // The store may normalize the record; the form takes whatever comes back.
        let stored = User::new("Jane", "Doe", "jane@x.com.invalid").with_id(1);
        responder.send(Ok(stored.clone())).unwrap();

        let snapshot = wait_for_snapshot(&form, |s| s.user == stored).await;
        assert!(snapshot.errors.is_empty());
        assert!(store_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_valid_new_record_is_not_sent() {
        let (form, mut store_rx) = mount(User::new("Jane", "Doe", "jane@x.com"));

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Unsaved);
        assert!(form.snapshot().await.unwrap().errors.is_empty());
        assert!(store_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_successful_submit_clears_previous_errors() {
        let (form, _store_rx) = mount(User::new("", "", "").with_id(1));

        let SubmitOutcome::Invalid(first) = form.submit().await.unwrap() else {
            panic!("empty record should be invalid");
        };
        assert_eq!(first.len(), 3);

        form.change_field(UserField::FirstName, "Jane".to_string()).await.unwrap();
        form.change_field(UserField::LastName, "Doe".to_string()).await.unwrap();
        form.change_field(UserField::Email, "jane@x.com".to_string()).await.unwrap();

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Dispatched);
        assert_eq!(form.snapshot().await.unwrap().errors, ErrorMap::new());
    }

    #[tokio::test]
    async fn test_error_map_is_rebuilt_not_merged() {
        let (form, _store_rx) = mount(User::new("", "Doe", "jane@x.com").with_id(1));
        form.submit().await.unwrap();

        form.change_field(UserField::FirstName, "Jane".to_string()).await.unwrap();
        form.change_field(UserField::LastName, String::new()).await.unwrap();
        form.submit().await.unwrap();

        let snapshot = form.snapshot().await.unwrap();
        assert_eq!(snapshot.errors, errors(&[(UserField::LastName, "Last name is required")]));
    }

    #[tokio::test]
    async fn test_change_field_touches_only_that_field() {
        let initial = User::new("Jane", "Doe", "jane@x.com").with_id(9);
        let (form, _store_rx) = mount(initial.clone());

        form.change_field(UserField::Email, "jane@y.org".to_string()).await.unwrap();
        let snapshot = form.snapshot().await.unwrap();

        assert_eq!(snapshot.user.id, initial.id);
        assert_eq!(snapshot.user.first_name, initial.first_name);
        assert_eq!(snapshot.user.last_name, initial.last_name);
        assert_eq!(snapshot.user.email, "jane@y.org");
        assert!(snapshot.errors.is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_local_record() {
        let user = User::new("Jane", "Doe", "jane@x.com").with_id(4);
        let (form, mut store_rx) = mount(user.clone());

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Dispatched);
        let (_, _, responder) = expect_update(&mut store_rx).await.expect("Expected Update request");
        responder.send(Err(FrameworkError::NotFound("4".into()))).unwrap();

        // Let the update task observe the failure before reading state.
        tokio::time::sleep(Duration::from_millis(20)).await;
        let snapshot = form.snapshot().await.unwrap();
        assert_eq!(snapshot.user, user);
        assert!(snapshot.errors.is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_submits_last_response_wins() {
        let (form, mut store_rx) = mount(User::new("Jane", "Doe", "jane@x.com").with_id(2));

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Dispatched);
        let (_, _, first) = expect_update(&mut store_rx).await.expect("Expected first Update");

        form.change_field(UserField::LastName, "Roe".to_string()).await.unwrap();
        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Dispatched);
        let (_, second_patch, second) = expect_update(&mut store_rx).await.expect("Expected second Update");
        assert_eq!(second_patch.last_name, "Roe");

        // Second call resolves first; the older response lands afterwards and wins.
        let newer = User::new("Jane", "Roe", "jane@x.com").with_id(2);
        second.send(Ok(newer.clone())).unwrap();
        wait_for_snapshot(&form, |s| s.user == newer).await;

        let older = User::new("Jane", "Doe", "jane@x.com").with_id(2);
        first.send(Ok(older.clone())).unwrap();
        wait_for_snapshot(&form, |s| s.user == older).await;
    }

    #[tokio::test]
    async fn test_pathless_violations_do_not_reach_error_map() {
        let (inner, mut store_rx) = create_mock_client::<User>(10);
        let schema = UserSchema::user_detail().rule(Rule::record(|_| Err("Record rejected".to_string())));
        let (service, form) = FormService::new(10, User::new("Jane", "Doe", "jane@x.com").with_id(1), UserClient::new(inner));
        tokio::spawn(service.with_schema(schema).run());

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Invalid(ErrorMap::new()));
        assert!(store_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_view_reflects_errors_and_values() {
        let (form, _store_rx) = mount(User::new("Jane", "Doe", "nope").with_id(1));
        form.submit().await.unwrap();

        let view = form.view().await.unwrap();
        let email = view.field(UserField::Email).unwrap();
        assert_eq!(email.value, "nope");
        assert!(email.error);
        assert_eq!(email.helper_text.as_deref(), Some("Must be in email format"));
        assert!(!view.field(UserField::FirstName).unwrap().error);
        assert_eq!(view.submit_label, "Save");
    }

    #[tokio::test]
    async fn test_shutdown_closes_form() {
        let (form, _store_rx) = mount(User::default());
        form.shutdown().await.unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(form.snapshot().await.is_err());
    }
}
