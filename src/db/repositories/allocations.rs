use diesel::prelude::*;

use crate::db::models::allocation::{
    Allocation, AllocationChanges, AllocationOrder, AllocationQuery, NewAllocation,
};
use crate::db::models::project::Project;

pub struct AllocationsRepo;

impl AllocationsRepo {
    pub fn list(
        conn: &mut PgConnection,
        filter: &AllocationQuery,
    ) -> Result<Vec<Allocation>, diesel::result::Error> {
        use crate::schema::allocations::dsl::*;
        let mut query = allocations.select(Allocation::as_select()).into_boxed();

        if let Some(emp) = filter.employee_id {
            query = query.filter(employee_id.eq(emp));
        }
        if let Some(proj) = filter.project_id {
            query = query.filter(project_id.eq(proj));
        }

        query = match filter.order {
            AllocationOrder::StartDateAsc => query.order((start_date.asc(), created_at.asc())),
            AllocationOrder::StartDateDesc => query.order((start_date.desc(), created_at.desc())),
        };
        query.load(conn)
    }

    pub fn list_with_projects(
        conn: &mut PgConnection,
        filter: &AllocationQuery,
    ) -> Result<Vec<(Allocation, Project)>, diesel::result::Error> {
        use crate::schema::{allocations, projects};
        let mut query = allocations::table
            .inner_join(projects::table)
            .select((Allocation::as_select(), Project::as_select()))
            .into_boxed();

        if let Some(emp) = filter.employee_id {
            query = query.filter(allocations::employee_id.eq(emp));
        }
        if let Some(proj) = filter.project_id {
            query = query.filter(allocations::project_id.eq(proj));
        }

        query = match filter.order {
            AllocationOrder::StartDateAsc => query.order(allocations::start_date.asc()),
            AllocationOrder::StartDateDesc => query.order(allocations::start_date.desc()),
        };
        query.load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        allocation_id: uuid::Uuid,
    ) -> Result<Option<Allocation>, diesel::result::Error> {
        use crate::schema::allocations::dsl::*;
        allocations
            .filter(id.eq(allocation_id))
            .select(Allocation::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(conn: &mut PgConnection, new_allocation: &NewAllocation) -> Result<Allocation, diesel::result::Error> {
        diesel::insert_into(crate::schema::allocations::table)
            .values(new_allocation)
            .returning(Allocation::as_returning())
            .get_result(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        allocation_id: uuid::Uuid,
        changes: &AllocationChanges,
    ) -> Result<Allocation, diesel::result::Error> {
        use crate::schema::allocations::dsl::*;
        diesel::update(allocations.filter(id.eq(allocation_id)))
            .set(changes)
            .returning(Allocation::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, allocation_id: uuid::Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::allocations::dsl::*;
        diesel::delete(allocations.filter(id.eq(allocation_id))).execute(conn)
    }
}
