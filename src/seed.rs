// src/seed.rs
//
// Idempotent seed of the category catalogs and the staff list, run with
// `uren-tracker-backend seed`. Re-running updates sort order and flags
// without touching session history.

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::error::AppError;

// (role, name, sort_order, requires_description)
const CATEGORIES: &[(&str, &str, i32, bool)] = &[
    ("ACCOUNTING", "Inkomende betalingen verwerken", 1, false),
    ("ACCOUNTING", "Uitgaande betalingen & leveranciers", 2, false),
    ("ACCOUNTING", "Facturatie (verkoop & service)", 3, false),
    ("ACCOUNTING", "Peppol & e-facturatie", 4, false),
    ("ACCOUNTING", "Leningen & financieringsdossiers", 5, false),
    ("ACCOUNTING", "Leasingadministratie", 6, false),
    ("ACCOUNTING", "BTW & fiscale aangiftes", 7, false),
    ("ACCOUNTING", "Boekhoudkundige controles & afsluitingen", 8, false),
    ("ACCOUNTING", "Interne administratie", 9, false),
    ("ACCOUNTING", "Overige taken", 10, true),
    ("RECEPTION", "E-mails verwerken", 1, false),
    ("RECEPTION", "Telefonie & klantontvangst", 2, false),
    ("RECEPTION", "Werkplaatsplanning", 3, false),
    ("RECEPTION", "Voorraadbeheer & onderdelen", 4, false),
    ("RECEPTION", "Garantiedossiers", 5, false),
    ("RECEPTION", "Terugroepacties (recalls)", 6, false),
    ("RECEPTION", "Schadedossiers & expertises", 7, false),
    ("RECEPTION", "Inschrijving & administratieve opvolging", 8, false),
    ("RECEPTION", "Leverancierscontact", 9, false),
    ("RECEPTION", "Overige taken", 10, true),
    ("SALES", "E-mails & digitale communicatie", 1, false),
    ("SALES", "Klantenontvangst & showroomgesprekken", 2, false),
    ("SALES", "Offertes & prijsberekeningen", 3, false),
    ("SALES", "Leads opvolgen", 4, false),
    ("SALES", "Telefonische prospectie", 5, false),
    ("SALES", "Voertuigpresentaties & testritten", 6, false),
    ("SALES", "Verkoopdossiers & contracten", 7, false),
    ("SALES", "Voertuigafleveringen", 8, false),
    ("SALES", "Showroombeheer", 9, false),
    ("SALES", "Social media & marketingacties", 10, false),
    ("SALES", "Stockbeheer & voertuigcontrole", 11, false),
    ("SALES", "Overige taken", 12, true),
    ("MANAGEMENT", "Emails", 1, false),
    ("MANAGEMENT", "GM Garanties", 2, false),
    ("MANAGEMENT", "Facturatie", 3, false),
    ("MANAGEMENT", "Werkplaats Management / Fiches", 4, false),
    ("MANAGEMENT", "DG", 5, false),
    ("MANAGEMENT", "Magazijn / Onderdelen", 6, false),
    ("MANAGEMENT", "Opvolging Sandra en Val", 7, false),
    ("MANAGEMENT", "Bestek / Expertises", 8, false),
    ("MANAGEMENT", "Overige taken", 9, true),
];

// (name, email, role)
const USERS: &[(&str, &str, &str)] = &[
    ("Stephanie", "stephanie@leie-autos.be", "ACCOUNTING"),
    ("Mieke", "mieke@leie-autos.be", "ACCOUNTING"),
    ("Valentin", "valentin@leie-autos.be", "RECEPTION"),
    ("Sandra", "sandra@leie-autos.be", "RECEPTION"),
    ("Oussama", "ossama@leie-autos.be", "SALES"),
    ("Silvio", "silvio@leie-autos.be", "SALES"),
    ("Christophe", "kristoff@leie-autos.be", "SALES"),
    ("Filiep", "filiep@leie-autos.be", "SALES"),
    ("Manon", "manon@leie-autos.be", "MANAGEMENT"),
    ("Admin", "admin@leie-autos.be", "ADMIN"),
];

pub async fn run(pool: &PgPool) -> Result<(), AppError> {
    tracing::info!("Seeding database");

    for (role, name, sort_order, requires_description) in CATEGORIES {
        sqlx::query(
            r#"INSERT INTO task_categories (role, name, sort_order, requires_description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (role, name) DO UPDATE SET
                sort_order = EXCLUDED.sort_order,
                requires_description = EXCLUDED.requires_description,
                is_active = TRUE"#,
        )
        .bind(role)
        .bind(name)
        .bind(sort_order)
        .bind(requires_description)
        .execute(pool)
        .await?;
    }

    tracing::info!(count = CATEGORIES.len(), "Categories seeded");

    let admin_password = std::env::var("SEED_ADMIN_PASSWORD")
        .unwrap_or_else(|_| "ChangeMe123!".to_string());
    let admin_hash = hash(&admin_password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    for (name, email, role) in USERS {
        let password_hash = if *role == "ADMIN" {
            Some(admin_hash.as_str())
        } else {
            None
        };

        // never clobber an existing password on re-seed
        sqlx::query(
            r#"INSERT INTO users (name, email, role, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET
                name = EXCLUDED.name,
                role = EXCLUDED.role,
                is_active = TRUE"#,
        )
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(password_hash)
        .execute(pool)
        .await?;
    }

    tracing::info!(count = USERS.len(), "Users seeded");

    Ok(())
}
