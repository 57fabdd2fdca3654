use diesel::prelude::*;

use crate::db::models::project::{NewProject, Project, ProjectChanges};

pub struct ProjectsRepo;

impl ProjectsRepo {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .select(Project::as_select())
            .order(name.asc())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .select(Project::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists_name(conn: &mut PgConnection, project_name: &str) -> Result<bool, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::select(diesel::dsl::exists(projects.filter(name.eq(project_name)))).get_result(conn)
    }

    pub fn insert(conn: &mut PgConnection, new_project: &NewProject) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(crate::schema::projects::table)
            .values(new_project)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
        changes: &ProjectChanges,
    ) -> Result<Project, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(projects.filter(id.eq(project_id)))
            .set(changes)
            .returning(Project::as_returning())
            .get_result(conn)
    }
}
