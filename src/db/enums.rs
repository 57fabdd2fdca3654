use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Declares a closed set of values stored as `text` columns.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize)]
        #[diesel(sql_type = Text)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                Self::parse(&s).ok_or_else(|| {
                    format!("Unrecognized {} variant: {}", stringify!($name), s).into()
                })
            }
        }
    };
}

text_enum! {
    /// Top-level organizational unit. Declaration order is the display order
    /// used by every per-entity rollup.
    Entity {
        Technology => "technology",
        Consulting => "consulting",
        Operations => "operations",
        SharedServices => "shared-services",
    }
}

text_enum! {
    EmploymentType {
        FullTime => "full-time",
        PartTime => "part-time",
        Contractor => "contractor",
        Intern => "intern",
    }
}

text_enum! {
    EmployeeStatus {
        Active => "active",
        Archived => "archived",
        OnHold => "on-hold",
    }
}

text_enum! {
    ProjectStatus {
        Active => "active",
        Completed => "completed",
        OnHold => "on-hold",
        Proposal => "proposal",
    }
}

text_enum! {
    /// Transitions only ever exist in their terminal state.
    TransitionStatus {
        Completed => "completed",
    }
}
