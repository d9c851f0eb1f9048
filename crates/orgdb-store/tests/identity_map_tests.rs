#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{count_rows, department_row, setup_db};
use orgdb_core::{Department, ExErrorKind};
use orgdb_store::{db, DepartmentRepo, EmployeeRepo, IdentityMap, Live};

#[test]
fn test_find_twice_returns_same_instance() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let id = departments.create("Payroll", "Building A").unwrap().id().unwrap();
    departments.clear_cache();

    let first = departments.find_by_id(id).unwrap().unwrap();
    let second = departments.find_by_id(id).unwrap().unwrap();
    assert!(Live::ptr_eq(&first, &second));

    first.modify(|d| d.set_location("Building Z")).unwrap();
    assert_eq!(second.borrow().location(), "Building Z");
}

#[test]
fn test_created_instance_is_the_cached_instance() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let created = departments.create("Payroll", "Building A").unwrap();
    let found = departments.find_by_name("Payroll").unwrap().unwrap();
    let all = departments.get_all().unwrap();

    assert!(Live::ptr_eq(&created, &found));
    assert!(Live::ptr_eq(&created, &all[0]));
}

#[test]
fn test_row_overwrites_unsaved_local_edits() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let dept = departments.create("Payroll", "Building A").unwrap();
    dept.modify(|d| d.set_name("Not Saved")).unwrap();

    let found = departments.find_by_id(dept.id().unwrap()).unwrap().unwrap();

    assert!(Live::ptr_eq(&dept, &found));
    assert_eq!(dept.borrow().name(), "Payroll");
}

#[test]
fn test_refresh_picks_up_external_writes() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let dept = departments.create("Payroll", "Building A").unwrap();
    conn.execute(
        "UPDATE departments SET location = 'Annex' WHERE id = ?1",
        [dept.id().unwrap()],
    )
    .unwrap();

    departments.get_all().unwrap();
    assert_eq!(dept.borrow().location(), "Annex");
}

#[test]
fn test_independent_repos_have_independent_maps() {
    let conn = setup_db();
    let repo_a = DepartmentRepo::new(&conn);
    let repo_b = DepartmentRepo::new(&conn);

    let id = repo_a.create("Payroll", "Building A").unwrap().id().unwrap();

    let from_a = repo_a.find_by_id(id).unwrap().unwrap();
    let from_b = repo_b.find_by_id(id).unwrap().unwrap();

    assert!(!Live::ptr_eq(&from_a, &from_b));
    assert_eq!(repo_a.cached_len(), 1);
    assert_eq!(repo_b.cached_len(), 1);
}

#[test]
fn test_clear_cache_yields_new_instances() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let created = departments.create("Payroll", "Building A").unwrap();
    departments.clear_cache();
    assert_eq!(departments.cached_len(), 0);

    let found = departments.find_by_id(created.id().unwrap()).unwrap().unwrap();
    assert!(!Live::ptr_eq(&created, &found));
    assert_eq!(departments.cached_len(), 1);
}

#[test]
fn test_borrowed_instance_is_reported_not_panicked() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let dept = departments.create("Payroll", "Building A").unwrap();
    let id = dept.id().unwrap();

    let guard = dept.borrow_mut();
    let err = departments.find_by_id(id).unwrap_err();
    drop(guard);

    assert_eq!(err.kind(), ExErrorKind::Concurrency);
    assert!(departments.find_by_id(id).unwrap().is_some());
}

#[test]
fn test_borrowed_instance_blocks_save_without_writing() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let dept = Live::new(Department::new("Payroll", "Building A").unwrap());
    let reader = dept.borrow();
    let err = departments.save(&dept).unwrap_err();
    drop(reader);

    assert_eq!(err.kind(), ExErrorKind::Concurrency);
    assert_eq!(count_rows(&conn, "departments"), 0);
    assert_eq!(dept.id(), None);
    assert_eq!(departments.cached_len(), 0);

    departments.save(&dept).unwrap();
    assert_eq!(count_rows(&conn, "departments"), 1);
}

#[test]
fn test_borrowed_instance_blocks_delete_without_writing() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let dept = departments.create("Payroll", "Building A").unwrap();
    let id = dept.id().unwrap();

    let reader = dept.borrow();
    let err = departments.delete(&dept).unwrap_err();
    drop(reader);

    assert_eq!(err.kind(), ExErrorKind::Concurrency);
    assert!(department_row(&conn, id).is_some());
    assert_eq!(dept.id(), Some(id));
    assert_eq!(departments.cached_len(), 1);

    departments.delete(&dept).unwrap();
    assert!(department_row(&conn, id).is_none());
    assert_eq!(dept.id(), None);
}

#[test]
fn test_drop_schema_detaches_handed_out_instances() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let old = departments.create("Old", "Building A").unwrap();
    departments.drop_schema().unwrap();
    departments.define_schema().unwrap();
    let new = departments.create("New", "Building A").unwrap();

    assert_eq!(old.id(), None);
    assert_eq!(new.id(), Some(1));

    old.modify(|d| d.set_name("Clobber")).unwrap();
    let err = departments.update(&old).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotPersisted);
    assert_eq!(department_row(&conn, 1).map(|r| r.1), Some("New".to_string()));
    assert_eq!(new.borrow().name(), "New");
}

#[test]
fn test_drop_schema_refused_while_instance_is_borrowed() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);

    let dept = departments.create("Payroll", "Building A").unwrap();
    let id = dept.id().unwrap();

    let writer = dept.borrow_mut();
    let err = departments.drop_schema().unwrap_err();
    drop(writer);

    assert_eq!(err.kind(), ExErrorKind::Concurrency);
    assert!(db::table_exists(&conn, "departments").unwrap());
    assert_eq!(dept.id(), Some(id));
    assert_eq!(departments.cached_len(), 1);
}

#[test]
fn test_employee_identity_survives_reads_through_every_path() {
    let conn = setup_db();
    let departments = DepartmentRepo::new(&conn);
    let employees = EmployeeRepo::new(&departments);

    let payroll = departments.create("Payroll", "Building A").unwrap();
    let lee = employees
        .create("Lee", "Accountant", payroll.id().unwrap())
        .unwrap();
    let id = lee.id().unwrap();

    let by_id = employees.find_by_id(id).unwrap().unwrap();
    let by_name = employees.find_by_name("Lee").unwrap().unwrap();
    let all = employees.get_all().unwrap();
    let staff = departments.employees_of(&employees, &payroll).unwrap();

    for handle in [&by_id, &by_name, &all[0], &staff[0]] {
        assert!(Live::ptr_eq(handle, &lee));
    }
}

#[test]
fn test_identity_map_register_and_evict() {
    let map: IdentityMap<Department> = IdentityMap::new();
    assert!(map.is_empty());

    let mut dept = Department::new("Payroll", "Building A").unwrap();
    dept.mark_persisted(1).unwrap();
    let live = Live::new(dept);
    map.register(1, live.clone());

    assert!(map.contains(1));
    assert!(Live::ptr_eq(&map.get(1).unwrap(), &live));

    let evicted = map.evict(1).unwrap();
    assert!(Live::ptr_eq(&evicted, &live));
    assert!(map.get(1).is_none());
}

#[test]
fn test_refresh_or_register() {
    let map: IdentityMap<Department> = IdentityMap::new();

    let mut first = Department::new("Payroll", "Building A").unwrap();
    first.mark_persisted(5).unwrap();
    let live = map.refresh_or_register(5, first).unwrap();
    assert_eq!(map.len(), 1);

    let mut fresh = Department::new("Payroll", "Building B").unwrap();
    fresh.mark_persisted(5).unwrap();
    let again = map.refresh_or_register(5, fresh).unwrap();

    assert!(Live::ptr_eq(&live, &again));
    assert_eq!(live.borrow().location(), "Building B");
    assert_eq!(map.len(), 1);
}

#[test]
fn test_snapshot_is_detached() {
    let dept = Live::new(Department::new("Payroll", "Building A").unwrap());
    let mut copy = dept.snapshot().unwrap();
    copy.set_name("Changed").unwrap();

    assert_eq!(dept.borrow().name(), "Payroll");
    assert_eq!(Live::handle_count(&dept), 1);
}
