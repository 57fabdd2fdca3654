use diesel::prelude::*;

use crate::db::enums::EmployeeStatus;
use crate::db::models::employee::{Employee, NewEmployee};

pub struct EmployeesRepo;

impl EmployeesRepo {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<Employee>, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        employees
            .select(Employee::as_select())
            .order(full_name.asc())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        employee_id: uuid::Uuid,
    ) -> Result<Option<Employee>, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        employees
            .filter(id.eq(employee_id))
            .select(Employee::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists_email(conn: &mut PgConnection, address: &str) -> Result<bool, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        diesel::select(diesel::dsl::exists(employees.filter(email.eq(address)))).get_result(conn)
    }

    pub fn insert(conn: &mut PgConnection, new_employee: &NewEmployee) -> Result<Employee, diesel::result::Error> {
        diesel::insert_into(crate::schema::employees::table)
            .values(new_employee)
            .returning(Employee::as_returning())
            .get_result(conn)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        employee_id: uuid::Uuid,
        new_status: EmployeeStatus,
    ) -> Result<Employee, diesel::result::Error> {
        use crate::schema::employees::dsl::*;
        diesel::update(employees.filter(id.eq(employee_id)))
            .set(status.eq(new_status))
            .returning(Employee::as_returning())
            .get_result(conn)
    }
}
