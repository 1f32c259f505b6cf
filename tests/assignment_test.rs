//! Assignment registry against a real (SQLite) store.

mod common;

use axum::http::StatusCode;
use uuid::Uuid;

use shiftdesk::domain::{RawShiftFilters, ShiftStatus, UserRole};
use shiftdesk::services::{
    AssignmentManager, AssignmentService, ShiftManager, ShiftService, UserManager, UserService,
};
use shiftdesk::Actor;

use common::{connect, seed_shift, seed_user, uow};

#[tokio::test]
async fn test_sync_replaces_set_by_difference() {
    let db = connect().await;
    let service = AssignmentManager::new(uow(&db));

    let employee = seed_user(&db, UserRole::Employee, "Anna").await;
    let c1 = seed_user(&db, UserRole::Customer, "Carl").await;
    let c2 = seed_user(&db, UserRole::Customer, "Dora").await;
    let c3 = seed_user(&db, UserRole::Customer, "Erik").await;

    let first = service
        .set_employee_customers(&employee, vec![c1.id.to_string(), c2.id.to_string()])
        .await
        .unwrap();
    assert_eq!(first.attached.len(), 2);
    assert!(first.detached.is_empty());

    // duplicates collapse
    let second = service
        .set_employee_customers(
            &employee,
            vec![c2.id.to_string(), c3.id.to_string(), c3.id.to_string()],
        )
        .await
        .unwrap();
    assert_eq!(second.attached, vec![c3.id]);
    assert_eq!(second.detached, vec![c1.id]);

    let names: Vec<String> = service
        .customers_of(employee.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Dora", "Erik"]);

    let serving_c2 = service.employees_of(c2.id).await.unwrap();
    assert_eq!(serving_c2.len(), 1);
    assert_eq!(serving_c2[0].id, employee.id);
    assert!(service.employees_of(c1.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_to_empty_set_detaches_all() {
    let db = connect().await;
    let service = AssignmentManager::new(uow(&db));

    let employee = seed_user(&db, UserRole::Employee, "Anna").await;
    let customer = seed_user(&db, UserRole::Customer, "Carl").await;

    service
        .set_employee_customers(&employee, vec![customer.id.to_string()])
        .await
        .unwrap();
    let outcome = service
        .set_employee_customers(&employee, vec![])
        .await
        .unwrap();

    assert_eq!(outcome.detached, vec![customer.id]);
    assert!(service.customers_of(employee.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_customer_ids_leave_set_untouched() {
    let db = connect().await;
    let service = AssignmentManager::new(uow(&db));

    let employee = seed_user(&db, UserRole::Employee, "Anna").await;
    let other_employee = seed_user(&db, UserRole::Employee, "Bo").await;
    let customer = seed_user(&db, UserRole::Customer, "Carl").await;

    service
        .set_employee_customers(&employee, vec![customer.id.to_string()])
        .await
        .unwrap();

    let err = service
        .set_employee_customers(
            &employee,
            vec![other_employee.id.to_string(), Uuid::new_v4().to_string()],
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(err.field_errors().unwrap().contains("customer_ids"));
    assert_eq!(service.customers_of(employee.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_user_removes_links_and_shifts() {
    let db = connect().await;
    let assignments = AssignmentManager::new(uow(&db));
    let users = UserManager::new(uow(&db));
    let shifts = ShiftManager::new(uow(&db));

    let admin = seed_user(&db, UserRole::Admin, "Admin").await;
    let anna = seed_user(&db, UserRole::Employee, "Anna").await;
    let bo = seed_user(&db, UserRole::Employee, "Bo").await;
    let carl = seed_user(&db, UserRole::Customer, "Carl").await;

    assignments
        .set_employee_customers(&anna, vec![carl.id.to_string()])
        .await
        .unwrap();
    assignments
        .set_employee_customers(&bo, vec![carl.id.to_string()])
        .await
        .unwrap();
    seed_shift(&db, "2025-01-10", "09:00", "10:00", &carl, &anna, ShiftStatus::Booked).await;
    seed_shift(&db, "2025-01-11", "09:00", "10:00", &carl, &bo, ShiftStatus::Booked).await;

    users.delete(UserRole::Employee, anna.id).await.unwrap();

    let actor = Actor::new(admin.id, UserRole::Admin);
    let remaining = shifts
        .list_shifts(&actor, RawShiftFilters::default())
        .await
        .unwrap()
        .shifts;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].employee.as_ref().unwrap().id, bo.id);

    let serving: Vec<Uuid> = assignments
        .employees_of(carl.id)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(serving, vec![bo.id]);

    assert!(users.get(UserRole::Employee, anna.id).await.is_err());
}

#[tokio::test]
async fn test_delete_through_wrong_namespace_is_not_found() {
    let db = connect().await;
    let users = UserManager::new(uow(&db));
    let carl = seed_user(&db, UserRole::Customer, "Carl").await;

    let err = users.delete(UserRole::Employee, carl.id).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert!(users.get(UserRole::Customer, carl.id).await.is_ok());
}
