//! Property-Based Tests for the user handlers
//!
//! Drives the handlers against `MemoryStore` with generated payloads.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use proptest::prelude::*;
use tokio_test::block_on;

use super::extract::Payload;
use super::handlers::AppState;
use super::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::error::ApiError;
use crate::models::{CreateUserRequest, UpdateUserRequest};
use crate::store::MemoryStore;

// == Strategies ==
fn username_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn field_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9@. ]{1,32}"
}

fn optional_field_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        field_strategy().prop_map(Some),
    ]
}

fn create_request_strategy() -> impl Strategy<Value = CreateUserRequest> {
    (
        username_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
    )
        .prop_map(|(username, firstname, lastname, email)| CreateUserRequest {
            username: Some(username),
            firstname: Some(firstname),
            lastname: Some(lastname),
            email: Some(email),
        })
}

/// Operations against the user resource
#[derive(Debug, Clone)]
enum UserOp {
    Create(CreateUserRequest),
    Delete(String),
}

fn user_op_strategy() -> impl Strategy<Value = UserOp> {
    prop_oneof![
        create_request_strategy().prop_map(UserOp::Create),
        username_strategy().prop_map(UserOp::Delete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property 1: a created user reads back with exactly the submitted fields.
    #[test]
    fn prop_create_then_get_round_trips(req in create_request_strategy()) {
        let state = AppState::new(MemoryStore::new());
        let username = req.username.clone().unwrap();

        block_on(create_user(State(state.clone()), Payload(req.clone()))).unwrap();
        let user = block_on(get_user(State(state), Path(username.clone()))).unwrap();

        prop_assert_eq!(&user.username, &username);
        prop_assert_eq!(&user.firstname, &req.firstname);
        prop_assert_eq!(&user.lastname, &req.lastname);
        prop_assert_eq!(&user.email, &req.email);
    }

    // Property 2: a second create with the same username conflicts and
    // leaves the first record untouched.
    #[test]
    fn prop_duplicate_create_conflicts(
        first in create_request_strategy(),
        second in create_request_strategy(),
    ) {
        let state = AppState::new(MemoryStore::new());
        let mut second = second;
        second.username = first.username.clone();
        let username = first.username.clone().unwrap();

        block_on(create_user(State(state.clone()), Payload(first.clone()))).unwrap();
        let result = block_on(create_user(State(state.clone()), Payload(second)));
        prop_assert!(matches!(result, Err(ApiError::Conflict(_))));

        let user = block_on(get_user(State(state), Path(username))).unwrap();
        prop_assert_eq!(&user.firstname, &first.firstname);
        prop_assert_eq!(&user.lastname, &first.lastname);
        prop_assert_eq!(&user.email, &first.email);
    }

    // Property 3: update changes exactly the non-empty supplied fields, and
    // an update with nothing to apply is rejected.
    #[test]
    fn prop_update_applies_only_supplied_fields(
        req in create_request_strategy(),
        firstname in optional_field_strategy(),
        lastname in optional_field_strategy(),
        email in optional_field_strategy(),
    ) {
        let state = AppState::new(MemoryStore::new());
        let username = req.username.clone().unwrap();
        block_on(create_user(State(state.clone()), Payload(req.clone()))).unwrap();

        let update = UpdateUserRequest { firstname, lastname, email };
        let nothing_to_apply = update.changes().is_empty();
        let result = block_on(update_user(
            State(state.clone()),
            Path(username.clone()),
            Payload(update.clone()),
        ));

        if nothing_to_apply {
            prop_assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        } else {
            prop_assert!(result.is_ok());
        }

        let pick = |new: &Option<String>, old: &Option<String>| match new.as_deref() {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => old.clone(),
        };
        let user = block_on(get_user(State(state), Path(username))).unwrap();
        prop_assert_eq!(user.firstname.clone(), pick(&update.firstname, &req.firstname));
        prop_assert_eq!(user.lastname.clone(), pick(&update.lastname, &req.lastname));
        prop_assert_eq!(user.email.clone(), pick(&update.email, &req.email));
    }

    // Property 4: after delete, get/update/delete all report not found.
    #[test]
    fn prop_delete_makes_user_absent(req in create_request_strategy()) {
        let state = AppState::new(MemoryStore::new());
        let username = req.username.clone().unwrap();
        block_on(create_user(State(state.clone()), Payload(req))).unwrap();

        block_on(delete_user(State(state.clone()), Path(username.clone()))).unwrap();

        let get = block_on(get_user(State(state.clone()), Path(username.clone())));
        prop_assert!(matches!(get, Err(ApiError::NotFound(_))));
        let update = block_on(update_user(
            State(state.clone()),
            Path(username.clone()),
            Payload(UpdateUserRequest {
                email: Some("x@y.z".to_string()),
                ..Default::default()
            }),
        ));
        prop_assert!(matches!(update, Err(ApiError::NotFound(_))));
        let delete = block_on(delete_user(State(state), Path(username)));
        prop_assert!(matches!(delete, Err(ApiError::NotFound(_))));
    }

    // Property 5: the listing is exactly the set of live users, and count
    // matches the array length.
    #[test]
    fn prop_list_reflects_live_users(ops in prop::collection::vec(user_op_strategy(), 1..40)) {
        let state = AppState::new(MemoryStore::new());
        let mut expected: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                UserOp::Create(req) => {
                    let username = req.username.clone().unwrap();
                    if block_on(create_user(State(state.clone()), Payload(req))).is_ok() {
                        expected.insert(username);
                    }
                }
                UserOp::Delete(username) => {
                    if block_on(delete_user(State(state.clone()), Path(username.clone()))).is_ok() {
                        expected.remove(&username);
                    }
                }
            }
        }

        let response = block_on(list_users(State(state))).unwrap();
        let listed: BTreeSet<String> =
            response.users.iter().map(|u| u.username.clone()).collect();

        prop_assert_eq!(response.count, response.users.len());
        prop_assert_eq!(listed, expected);
    }
}
