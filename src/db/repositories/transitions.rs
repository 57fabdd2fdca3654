use diesel::prelude::*;

use crate::db::models::transition::{
    NewProjectTransition, NewTransitionComment, ProjectTransition, TransitionComment,
    TransitionQuery,
};

pub struct TransitionsRepo;

impl TransitionsRepo {
    pub fn list(
        conn: &mut PgConnection,
        filter: &TransitionQuery,
    ) -> Result<Vec<ProjectTransition>, diesel::result::Error> {
        use crate::schema::project_transitions::dsl::*;
        let mut query = project_transitions
            .select(ProjectTransition::as_select())
            .into_boxed();

        if let Some(emp) = filter.employee_id {
            query = query.filter(employee_id.eq(emp));
        }
        if let Some(proj) = filter.project_id {
            query = query.filter(project_id.eq(proj));
        }

        query
            .order((end_date.desc().nulls_first(), created_at.desc()))
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        transition_id: uuid::Uuid,
    ) -> Result<Option<ProjectTransition>, diesel::result::Error> {
        use crate::schema::project_transitions::dsl::*;
        project_transitions
            .filter(id.eq(transition_id))
            .select(ProjectTransition::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_transition: &NewProjectTransition,
    ) -> Result<ProjectTransition, diesel::result::Error> {
        diesel::insert_into(crate::schema::project_transitions::table)
            .values(new_transition)
            .returning(ProjectTransition::as_returning())
            .get_result(conn)
    }

    /// Removes the transition together with its comment thread.
    pub fn delete_by_id(conn: &mut PgConnection, target_id: uuid::Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::{project_transitions, transition_comments};
        conn.transaction(|conn| {
            diesel::delete(
                transition_comments::table.filter(transition_comments::transition_id.eq(target_id)),
            )
            .execute(conn)?;
            diesel::delete(project_transitions::table.filter(project_transitions::id.eq(target_id)))
                .execute(conn)
        })
    }

    pub fn list_comments(
        conn: &mut PgConnection,
        target_transition_id: uuid::Uuid,
    ) -> Result<Vec<TransitionComment>, diesel::result::Error> {
        use crate::schema::transition_comments::dsl::*;
        transition_comments
            .filter(transition_id.eq(target_transition_id))
            .select(TransitionComment::as_select())
            .order(created_at.asc())
            .load(conn)
    }

    pub fn insert_comment(
        conn: &mut PgConnection,
        new_comment: &NewTransitionComment,
    ) -> Result<TransitionComment, diesel::result::Error> {
        diesel::insert_into(crate::schema::transition_comments::table)
            .values(new_comment)
            .returning(TransitionComment::as_returning())
            .get_result(conn)
    }
}
