//! Weekly inventory notification engine
//!
//! Scans the inventory tables for time-based conditions (expiring
//! consumables, camera gear due back or overdue, lab equipment due for
//! service) and emails admins and TAs one batched report per category.
//!
//! The checks are intentionally resilient: date-range and role filters
//! are pushed down to the database first and fall back to a full scan
//! with in-process predicates when the filtered query fails, and a
//! failed send is logged rather than raised so a scheduled trigger can
//! always run to completion. Each invocation is stateless; running the
//! same check twice in one day re-sends the same report.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Days, Duration, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::TasksConfig,
    error::AppResult,
    models::{
        camera_gear::CameraGear, consumable::Consumable, enums::UserRole,
        lab_equipment::LabEquipment, user::User,
    },
    repository::InventoryStore,
};

use super::{email::Mailer, frequency::parse_frequency_opt};

/// Outcome of one notification dispatch.
///
/// `Sent` and `AttemptFailed` both mean an attempt was made; only
/// `Skipped` means there was nothing to do (no matching items, no
/// recipients, or mail disabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Skipped,
    Sent,
    AttemptFailed,
}

impl DispatchOutcome {
    /// Whether a send was attempted, regardless of delivery result
    pub fn attempted(&self) -> bool {
        !matches!(self, DispatchOutcome::Skipped)
    }
}

/// Per-category outcomes of one weekly run
#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklyRunSummary {
    pub consumables: DispatchOutcome,
    pub camera_gear: DispatchOutcome,
    pub lab_equipment: DispatchOutcome,
}

/// Per-record result of the lab equipment service check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceDue {
    /// Service is due on or before today
    Due(NaiveDate),
    NotDue,
    /// Record cannot be evaluated (missing or unparseable fields)
    Skip,
}

#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn InventoryStore>,
    mailer: Option<Arc<dyn Mailer>>,
    config: TasksConfig,
}

impl NotificationService {
    pub fn new(
        store: Arc<dyn InventoryStore>,
        mailer: Option<Arc<dyn Mailer>>,
        config: TasksConfig,
    ) -> Self {
        Self {
            store,
            mailer,
            config,
        }
    }

    /// Run all three weekly checks sequentially.
    ///
    /// Anticipated failures (flaky filters, bad records, send errors)
    /// are absorbed inside each check; an error escaping here is a bug
    /// and surfaces as a 500 at the trigger endpoint.
    pub async fn run_weekly_checks(&self) -> AppResult<WeeklyRunSummary> {
        let consumables = self.notify_consumables_expiring_this_week().await?;
        let camera_gear = self.notify_camera_gear_due_returns().await?;
        let lab_equipment = self.notify_lab_equipment_service_reminders().await?;

        Ok(WeeklyRunSummary {
            consumables,
            camera_gear,
            lab_equipment,
        })
    }

    /// Find consumables expiring within the next 7 days and email admins/TAs
    pub async fn notify_consumables_expiring_this_week(&self) -> AppResult<DispatchOutcome> {
        let today = Utc::now().date_naive();
        let week_end = today + Duration::days(6);

        let items = match self.store.consumables_expiring_between(today, week_end).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Consumables date filter failed, falling back to full scan: {}", e);
                self.store
                    .consumables_all()
                    .await?
                    .into_iter()
                    .filter(|c| expires_within(c, today, week_end))
                    .collect()
            }
        };

        if items.is_empty() {
            tracing::info!("No consumables expiring this week; skipping email.");
            return Ok(DispatchOutcome::Skipped);
        }

        let recipients = self.resolve_recipients().await?;
        if recipients.is_empty() {
            tracing::info!("No admin/TA recipients for expiration notifications.");
            return Ok(DispatchOutcome::Skipped);
        }

        let (subject, body) = consumables_report(today, &items);
        Ok(dispatch_report(
            self.mailer.as_deref(),
            "consumables expiration",
            &subject,
            &recipients,
            &body,
        ))
    }

    /// Notify admins/TAs about camera gear due back within the
    /// configured window or already overdue
    pub async fn notify_camera_gear_due_returns(&self) -> AppResult<DispatchOutcome> {
        let today = Utc::now().date_naive();
        let window_end = today + Duration::days(i64::from(self.config.gear_return_window_days) - 1);

        let upcoming = match self.store.camera_gear_due_between(today, window_end).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Gear due-date filter failed, falling back to full scan: {}", e);
                self.store
                    .camera_gear_all()
                    .await?
                    .into_iter()
                    .filter(|g| gear_due_within(g, today, window_end))
                    .collect()
            }
        };

        let overdue = match self.store.camera_gear_overdue_before(today).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Gear overdue filter failed, falling back to full scan: {}", e);
                self.store
                    .camera_gear_all()
                    .await?
                    .into_iter()
                    .filter(|g| gear_overdue(g, today))
                    .collect()
            }
        };

        let items = merge_gear_by_id(upcoming, overdue);
        if items.is_empty() {
            tracing::info!("No camera gear due for return this week.");
            return Ok(DispatchOutcome::Skipped);
        }

        let recipients = self.resolve_recipients().await?;
        if recipients.is_empty() {
            tracing::info!("No admin/TA recipients for camera gear return notifications.");
            return Ok(DispatchOutcome::Skipped);
        }

        let (subject, body) = gear_report(today, &items);
        Ok(dispatch_report(
            self.mailer.as_deref(),
            "camera gear return",
            &subject,
            &recipients,
            &body,
        ))
    }

    /// Notify admins/TAs about lab equipment due for service based on
    /// last_serviced_on + service_frequency
    pub async fn notify_lab_equipment_service_reminders(&self) -> AppResult<DispatchOutcome> {
        let today = Utc::now().date_naive();

        let mut due_items = Vec::new();
        for equipment in self.store.lab_equipment_all().await? {
            match evaluate_service(&equipment, today) {
                ServiceDue::Due(next_due) => due_items.push((equipment, next_due)),
                ServiceDue::NotDue => {}
                ServiceDue::Skip => {
                    tracing::debug!(
                        "Skipping lab equipment {} (id: {}): service schedule unknown",
                        equipment.name,
                        equipment.id
                    );
                }
            }
        }

        if due_items.is_empty() {
            tracing::info!("No lab equipment due for service this week.");
            return Ok(DispatchOutcome::Skipped);
        }

        let recipients = self.resolve_recipients().await?;
        if recipients.is_empty() {
            tracing::info!("No admin/TA recipients for lab equipment service notifications.");
            return Ok(DispatchOutcome::Skipped);
        }

        let (subject, body) = equipment_report(today, &due_items);
        Ok(dispatch_report(
            self.mailer.as_deref(),
            "lab equipment service",
            &subject,
            &recipients,
            &body,
        ))
    }

    /// Send a low-stock alert for one consumable to all admins/TAs
    pub async fn send_low_stock_alert(&self, item: &Consumable) -> AppResult<DispatchOutcome> {
        if item.quantity > self.config.low_stock_threshold {
            tracing::info!(
                "Item {} (id: {}) above low-stock threshold; skipping.",
                item.name,
                item.id
            );
            return Ok(DispatchOutcome::Skipped);
        }

        let recipients = self.resolve_recipients().await?;
        if recipients.is_empty() {
            tracing::info!("No admin/TA recipients for low-stock alert for item id {}", item.id);
            return Ok(DispatchOutcome::Skipped);
        }

        let (subject, body) = low_stock_report(item);
        Ok(dispatch_report(
            self.mailer.as_deref(),
            "low stock",
            &subject,
            &recipients,
            &body,
        ))
    }

    /// Resolve the admin/TA email addresses entitled to notifications
    async fn resolve_recipients(&self) -> AppResult<Vec<String>> {
        let users = match self.store.notifiable_users().await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!("Role filter query failed, falling back to full scan: {}", e);
                self.store.users_all().await?
            }
        };

        Ok(eligible_emails(&users))
    }
}

// ---------------------------------------------------------------------------
// Eligibility predicates
//
// These are the in-process counterparts of the repository pushdown
// filters; the fallback path applies them to a full table scan so both
// paths select the same records.
// ---------------------------------------------------------------------------

/// Consumable expires within [start, end] inclusive
pub fn expires_within(item: &Consumable, start: NaiveDate, end: NaiveDate) -> bool {
    item.expires.is_some_and(|d| d >= start && d <= end)
}

/// Checked-out gear due back within [start, end] inclusive
pub fn gear_due_within(gear: &CameraGear, start: NaiveDate, end: NaiveDate) -> bool {
    gear.is_checked_out && gear.return_date.is_some_and(|d| d >= start && d <= end)
}

/// Checked-out gear whose return date has already passed
pub fn gear_overdue(gear: &CameraGear, today: NaiveDate) -> bool {
    gear.is_checked_out && gear.return_date.is_some_and(|d| d < today)
}

/// Evaluate one lab equipment record against today.
///
/// Records missing a service date or a parseable frequency are skipped,
/// not treated as due.
pub fn evaluate_service(equipment: &LabEquipment, today: NaiveDate) -> ServiceDue {
    let Some(last_serviced) = equipment.last_serviced_on else {
        return ServiceDue::Skip;
    };
    let Some(days) = parse_frequency_opt(equipment.service_frequency.as_deref()) else {
        return ServiceDue::Skip;
    };

    match last_serviced.checked_add_days(Days::new(u64::from(days))) {
        Some(next_due) if next_due <= today => ServiceDue::Due(next_due),
        Some(_) => ServiceDue::NotDue,
        // Date overflow: treat the record as unprocessable
        None => ServiceDue::Skip,
    }
}

/// Keep users with a notifiable role and a non-empty email address
pub fn eligible_emails(users: &[User]) -> Vec<String> {
    users
        .iter()
        .filter(|u| UserRole::NOTIFIABLE.contains(&u.role()))
        .filter_map(|u| u.email.as_deref())
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

/// Union the upcoming and overdue result sets, de-duplicated by id.
/// An item matched by both queries appears exactly once.
pub fn merge_gear_by_id(upcoming: Vec<CameraGear>, overdue: Vec<CameraGear>) -> Vec<CameraGear> {
    let mut seen: HashSet<i32> = HashSet::new();
    let mut merged = Vec::with_capacity(upcoming.len() + overdue.len());
    for gear in upcoming.into_iter().chain(overdue) {
        if seen.insert(gear.id) {
            merged.push(gear);
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Report composition
// ---------------------------------------------------------------------------

fn consumables_report(today: NaiveDate, items: &[Consumable]) -> (String, String) {
    let subject = format!("Consumables expiring the week of {}", today);
    let mut lines = vec!["Consumables expiring this week:".to_string(), String::new()];
    for item in items {
        let expires = item
            .expires
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        lines.push(format!(
            "- {} (id: {}); expires: {}; qty: {}; location: {}",
            item.name,
            item.id,
            expires,
            item.quantity,
            item.location_label()
        ));
    }
    (subject, lines.join("\n"))
}

fn gear_report(today: NaiveDate, items: &[CameraGear]) -> (String, String) {
    let subject = format!("Camera gear return reminders (week of {})", today);
    let mut lines = vec!["Camera gear due for return or overdue:".to_string(), String::new()];
    for gear in items {
        let return_date = gear
            .return_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        lines.push(format!(
            "- {} (id: {}); return date: {}; checked out by: {}; location: {}",
            gear.name,
            gear.id,
            return_date,
            gear.borrower_label(),
            gear.location_label()
        ));
    }
    (subject, lines.join("\n"))
}

fn equipment_report(today: NaiveDate, due_items: &[(LabEquipment, NaiveDate)]) -> (String, String) {
    let subject = format!("Lab equipment service reminders (as of {})", today);
    let mut lines = vec!["Lab equipment due for service:".to_string(), String::new()];
    for (equipment, next_due) in due_items {
        let last_serviced = equipment
            .last_serviced_on
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        lines.push(format!(
            "- {} (id: {}); last serviced: {}; next due: {}; frequency: {}",
            equipment.name,
            equipment.id,
            last_serviced,
            next_due,
            equipment.service_frequency.as_deref().unwrap_or("Unknown")
        ));
    }
    (subject, lines.join("\n"))
}

fn low_stock_report(item: &Consumable) -> (String, String) {
    let subject = format!("Low stock alert: {}", item.name);
    let body = format!(
        "Item '{}' (id: {}) has low stock.\nQuantity remaining: {}\nLocation: {}\n\nPlease restock or re-order as needed.",
        item.name,
        item.id,
        item.quantity,
        item.location_label()
    );
    (subject, body)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Attempt one batched send through the optional mailer.
///
/// A missing mailer means notifications are disabled and nothing is
/// attempted. A send error is logged and reported as `AttemptFailed`,
/// never raised; retry is left to the next scheduled run.
fn dispatch_report(
    mailer: Option<&dyn Mailer>,
    category: &str,
    subject: &str,
    recipients: &[String],
    body: &str,
) -> DispatchOutcome {
    let Some(mailer) = mailer else {
        tracing::info!("Mail disabled; skipping {} notification.", category);
        return DispatchOutcome::Skipped;
    };

    match mailer.send(subject, recipients, body) {
        Ok(()) => {
            tracing::info!(
                "Sent {} notification to {} recipient(s).",
                category,
                recipients.len()
            );
            DispatchOutcome::Sent
        }
        Err(e) => {
            tracing::error!("Failed to send {} email: {}", category, e);
            DispatchOutcome::AttemptFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repository::MockInventoryStore;
    use crate::services::email::MockMailer;

    fn service(store: MockInventoryStore, mailer: MockMailer) -> NotificationService {
        NotificationService::new(
            Arc::new(store),
            Some(Arc::new(mailer)),
            TasksConfig::default(),
        )
    }

    fn consumable(id: i32, expires: Option<NaiveDate>) -> Consumable {
        Consumable {
            id,
            name: format!("Film {}", id),
            quantity: 3,
            expires,
            location_id: None,
            location_name: Some("Shelf B".to_string()),
        }
    }

    fn gear(id: i32, is_checked_out: bool, return_date: Option<NaiveDate>) -> CameraGear {
        CameraGear {
            id,
            name: format!("Camera {}", id),
            is_checked_out,
            checked_out_by: None,
            checked_out_date: None,
            return_date,
            location_id: None,
            location_name: None,
            checked_out_by_email: Some("student@example.com".to_string()),
        }
    }

    fn equipment(id: i32, last_serviced_on: Option<NaiveDate>, frequency: Option<&str>) -> LabEquipment {
        LabEquipment {
            id,
            name: format!("Enlarger {}", id),
            last_serviced_on,
            service_frequency: frequency.map(str::to_string),
        }
    }

    fn user(role: UserRole, email: Option<&str>) -> User {
        User {
            id: 1,
            first_name: "Alex".to_string(),
            last_name: "Doe".to_string(),
            email: email.map(str::to_string),
            role: role.into(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_expires_within_bounds() {
        let start = today();
        let end = start + Duration::days(6);

        assert!(expires_within(&consumable(1, Some(start)), start, end));
        assert!(expires_within(&consumable(2, Some(start + Duration::days(5))), start, end));
        assert!(expires_within(&consumable(3, Some(end)), start, end));
        assert!(!expires_within(&consumable(4, Some(start + Duration::days(8))), start, end));
        assert!(!expires_within(&consumable(5, Some(start - Duration::days(1))), start, end));
        assert!(!expires_within(&consumable(6, None), start, end));
    }

    #[test]
    fn test_gear_due_and_overdue() {
        let start = today();
        let end = start + Duration::days(6);

        assert!(gear_due_within(&gear(1, true, Some(start + Duration::days(2))), start, end));
        assert!(!gear_due_within(&gear(2, false, Some(start + Duration::days(2))), start, end));
        assert!(!gear_due_within(&gear(3, true, None), start, end));
        assert!(!gear_due_within(&gear(4, true, Some(start - Duration::days(1))), start, end));

        assert!(gear_overdue(&gear(5, true, Some(start - Duration::days(1))), start));
        assert!(!gear_overdue(&gear(6, false, Some(start - Duration::days(1))), start));
        assert!(!gear_overdue(&gear(7, true, Some(start)), start));
        assert!(!gear_overdue(&gear(8, true, None), start));
    }

    #[test]
    fn test_merge_gear_deduplicates() {
        let start = today();
        let a = gear(1, true, Some(start + Duration::days(2)));
        let b = gear(2, true, Some(start - Duration::days(1)));
        let a_again = gear(1, true, Some(start + Duration::days(2)));

        let merged = merge_gear_by_id(vec![a, b], vec![a_again]);
        let ids: Vec<i32> = merged.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_evaluate_service_due() {
        let now = today();
        let eq = equipment(1, Some(now - Duration::days(40)), Some("30"));
        assert_eq!(
            evaluate_service(&eq, now),
            ServiceDue::Due(now - Duration::days(10))
        );
    }

    #[test]
    fn test_evaluate_service_due_exactly_today() {
        let now = today();
        let eq = equipment(1, Some(now - Duration::days(7)), Some("weekly"));
        assert_eq!(evaluate_service(&eq, now), ServiceDue::Due(now));
    }

    #[test]
    fn test_evaluate_service_not_due() {
        let now = today();
        let eq = equipment(1, Some(now - Duration::days(10)), Some("monthly"));
        assert_eq!(evaluate_service(&eq, now), ServiceDue::NotDue);
    }

    #[test]
    fn test_evaluate_service_skips_unknown() {
        let now = today();
        assert_eq!(evaluate_service(&equipment(1, None, Some("30")), now), ServiceDue::Skip);
        assert_eq!(
            evaluate_service(&equipment(2, Some(now - Duration::days(40)), None), now),
            ServiceDue::Skip
        );
        assert_eq!(
            evaluate_service(&equipment(3, Some(now - Duration::days(40)), Some("whenever")), now),
            ServiceDue::Skip
        );
    }

    #[test]
    fn test_eligible_emails_filters_roles_and_empty_addresses() {
        let users = vec![
            user(UserRole::Admin, Some("admin@example.com")),
            user(UserRole::Student, Some("student@example.com")),
            user(UserRole::Ta, Some("")),
            user(UserRole::Invalid, Some("invalid@example.com")),
            user(UserRole::Ta, None),
        ];
        assert_eq!(eligible_emails(&users), vec!["admin@example.com".to_string()]);
    }

    #[test]
    fn test_eligible_emails_empty_when_sole_admin_has_no_email() {
        let users = vec![user(UserRole::Admin, None)];
        assert!(eligible_emails(&users).is_empty());
    }

    #[test]
    fn test_consumables_report_lines() {
        let now = today();
        let items = vec![consumable(7, Some(now + Duration::days(3)))];
        let (subject, body) = consumables_report(now, &items);

        assert!(subject.contains("2025-03-10"));
        assert!(body.contains("Film 7"));
        assert!(body.contains("(id: 7)"));
        assert!(body.contains("2025-03-13"));
        assert!(body.contains("Shelf B"));
    }

    #[test]
    fn test_gear_report_substitutes_unknown() {
        let now = today();
        let mut g = gear(3, true, Some(now - Duration::days(2)));
        g.checked_out_by_email = None;
        let (_, body) = gear_report(now, &[g]);

        assert!(body.contains("Camera 3"));
        assert!(body.contains("checked out by: Unknown"));
        assert!(body.contains("location: Unknown"));
    }

    #[test]
    fn test_equipment_report_lines() {
        let now = today();
        let eq = equipment(9, Some(now - Duration::days(40)), Some("monthly"));
        let (subject, body) = equipment_report(now, &[(eq, now - Duration::days(10))]);

        assert!(subject.contains("as of 2025-03-10"));
        assert!(body.contains("Enlarger 9"));
        assert!(body.contains("frequency: monthly"));
        assert!(body.contains("next due: 2025-02-28"));
    }

    #[test]
    fn test_low_stock_report() {
        let item = consumable(4, None);
        let (subject, body) = low_stock_report(&item);

        assert_eq!(subject, "Low stock alert: Film 4");
        assert!(body.contains("Quantity remaining: 3"));
        assert!(body.contains("Location: Shelf B"));
    }

    #[tokio::test]
    async fn test_consumables_fallback_filters_full_scan() {
        let today = Utc::now().date_naive();
        let rows = vec![
            consumable(1, Some(today + Duration::days(2))),
            consumable(2, Some(today + Duration::days(30))),
            consumable(3, None),
        ];

        let mut store = MockInventoryStore::new();
        store
            .expect_consumables_expiring_between()
            .times(1)
            .returning(|_, _| Err(AppError::Internal("range filter unsupported".to_string())));
        store
            .expect_consumables_all()
            .times(1)
            .return_once(move || Ok(rows));
        store
            .expect_notifiable_users()
            .times(1)
            .returning(|| Ok(vec![user(UserRole::Admin, Some("admin@example.com"))]));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .withf(|_, _, body| {
                body.contains("(id: 1)") && !body.contains("(id: 2)") && !body.contains("(id: 3)")
            })
            .returning(|_, _, _| Ok(()));

        let svc = service(store, mailer);
        let outcome = svc.notify_consumables_expiring_this_week().await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Sent);
    }

    #[tokio::test]
    async fn test_gear_fallback_selects_due_and_overdue() {
        let today = Utc::now().date_naive();
        let rows = vec![
            gear(1, true, Some(today + Duration::days(1))),
            gear(2, true, Some(today - Duration::days(3))),
            gear(3, false, Some(today)),
        ];

        let mut store = MockInventoryStore::new();
        store
            .expect_camera_gear_due_between()
            .times(1)
            .returning(|_, _| Err(AppError::Internal("range filter unsupported".to_string())));
        store
            .expect_camera_gear_overdue_before()
            .times(1)
            .returning(|_| Err(AppError::Internal("comparison unsupported".to_string())));
        store
            .expect_camera_gear_all()
            .times(2)
            .returning(move || Ok(rows.clone()));
        store
            .expect_notifiable_users()
            .times(1)
            .returning(|| Ok(vec![user(UserRole::Ta, Some("ta@example.com"))]));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .withf(|_, _, body| {
                body.matches("(id: 1)").count() == 1
                    && body.matches("(id: 2)").count() == 1
                    && !body.contains("(id: 3)")
            })
            .returning(|_, _, _| Ok(()));

        let svc = service(store, mailer);
        let outcome = svc.notify_camera_gear_due_returns().await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Sent);
    }

    #[tokio::test]
    async fn test_recipient_fallback_on_role_filter_error() {
        let today = Utc::now().date_naive();
        let items = vec![consumable(1, Some(today + Duration::days(1)))];

        let mut store = MockInventoryStore::new();
        store
            .expect_consumables_expiring_between()
            .times(1)
            .return_once(move |_, _| Ok(items));
        store
            .expect_notifiable_users()
            .times(1)
            .returning(|| Err(AppError::Internal("in-set comparison unsupported".to_string())));
        store.expect_users_all().times(1).returning(|| {
            Ok(vec![
                user(UserRole::Admin, Some("admin@example.com")),
                user(UserRole::Student, Some("student@example.com")),
            ])
        });

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .withf(|_, recipients, _| {
                recipients.len() == 1 && recipients[0] == "admin@example.com"
            })
            .returning(|_, _, _| Ok(()));

        let svc = service(store, mailer);
        let outcome = svc.notify_consumables_expiring_this_week().await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Sent);
    }

    #[tokio::test]
    async fn test_no_matching_items_skips_recipient_lookup() {
        let mut store = MockInventoryStore::new();
        store
            .expect_consumables_expiring_between()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        // No expectations on recipients or the mailer: touching either
        // would fail the test.
        let svc = service(store, MockMailer::new());
        let outcome = svc.notify_consumables_expiring_this_week().await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_low_stock_alert_above_threshold_skips() {
        let svc = service(MockInventoryStore::new(), MockMailer::new());
        let mut item = consumable(1, None);
        item.quantity = 20;

        let outcome = svc.send_low_stock_alert(&item).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_low_stock_alert_at_or_below_threshold_sends() {
        let mut store = MockInventoryStore::new();
        store
            .expect_notifiable_users()
            .times(1)
            .returning(|| Ok(vec![user(UserRole::Admin, Some("admin@example.com"))]));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .withf(|subject, _, _| subject.starts_with("Low stock alert:"))
            .returning(|_, _, _| Ok(()));

        let svc = service(store, mailer);
        let item = consumable(1, None);
        let outcome = svc.send_low_stock_alert(&item).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Sent);
    }

    #[test]
    fn test_dispatch_without_mailer_is_skipped() {
        let recipients = vec!["admin@example.com".to_string()];
        let outcome = dispatch_report(None, "consumables expiration", "s", &recipients, "b");
        assert_eq!(outcome, DispatchOutcome::Skipped);
        assert!(!outcome.attempted());
    }

    #[test]
    fn test_dispatch_success() {
        let mut mailer = MockMailer::new();
        mailer.expect_send().times(1).returning(|_, _, _| Ok(()));

        let recipients = vec!["admin@example.com".to_string()];
        let outcome =
            dispatch_report(Some(&mailer), "camera gear return", "s", &recipients, "b");
        assert_eq!(outcome, DispatchOutcome::Sent);
        assert!(outcome.attempted());
    }

    #[test]
    fn test_dispatch_send_failure_is_swallowed() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_, _, _| Err(AppError::Mail("relay refused".to_string())));

        let recipients = vec!["admin@example.com".to_string()];
        let outcome =
            dispatch_report(Some(&mailer), "lab equipment service", "s", &recipients, "b");
        assert_eq!(outcome, DispatchOutcome::AttemptFailed);
        assert!(outcome.attempted());
    }
}
