use diesel::prelude::*;

use crate::db::models::certification::{Certification, NewCertification};

pub struct CertificationsRepo;

impl CertificationsRepo {
    /// Soonest expiry first; certifications without an expiry come last.
    pub fn list_by_employee(
        conn: &mut PgConnection,
        target_employee_id: uuid::Uuid,
    ) -> Result<Vec<Certification>, diesel::result::Error> {
        use crate::schema::certifications::dsl::*;
        certifications
            .filter(employee_id.eq(target_employee_id))
            .select(Certification::as_select())
            .order((valid_until.asc().nulls_last(), name.asc()))
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        certification_id: uuid::Uuid,
    ) -> Result<Option<Certification>, diesel::result::Error> {
        use crate::schema::certifications::dsl::*;
        certifications
            .filter(id.eq(certification_id))
            .select(Certification::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_certification: &NewCertification,
    ) -> Result<Certification, diesel::result::Error> {
        diesel::insert_into(crate::schema::certifications::table)
            .values(new_certification)
            .returning(Certification::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, certification_id: uuid::Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::certifications::dsl::*;
        diesel::delete(certifications.filter(id.eq(certification_id))).execute(conn)
    }
}
