//! Request and response payloads for the remote scheduling site.
//!
//! The site is an ASP.NET Web Forms app fronting an ASMX service layer.
//! Numbers travel as strings in most places, and the stage endpoint wants
//! a whole JSON document nested inside a JSON string, so the shapes here
//! mirror what the site's own frontend sends rather than anything tidy.

use chrono::NaiveDate;
use courtbot_core::{Court, Credential, ResourceAvailability};
use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/MIT/Login.aspx?AspxAutoDetectCookieSupport=1";
pub const AVAILABILITY_PATH: &str =
    "/MIT/Library/OlsService.asmx/GetSchedulerResourceAvailability";
pub const STAGE_PATH: &str = "/MIT/Library/OlsService.asmx/SetScheduleInformation";
pub const CONFIRM_PATH: &str =
    "/MIT/Members/Scheduler/AddFamilyMembersScheduler.aspx?showOfflineMessage=true";

/// Forms-auth cookie name. The login endpoint only issues a real value
/// when the request already carries one under this name, so a placeholder
/// is seeded into the jar before the handshake.
pub const FORMS_AUTH_COOKIE: &str = ".CSIASPXFORMSAUTH";

/// The site rejects requests that do not look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/60.0.3112.90 Safari/537.36";

const SITE_ID: u32 = 1261;
const SERVICE_ID: u32 = 4;
const SERVICE_NAME: &str = "Recreational Squash";
const SERVICE_UNIQUE_IDENTIFIER: &str = "757170ab-4338-4ff6-868d-2fb51cc449f8";
const RESOURCE_NAME_PREFIX: &str = "Zesiger Squash Court";
const BOOKING_DURATION_MINUTES: u32 = 60;

/// `MM/DD/YYYY`, the only date format the site accepts.
pub fn site_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Login form fields, keyed by the site's generated control names.
pub fn login_form(credential: &Credential) -> [(&'static str, String); 2] {
    [
        (
            "ctl00$pageContentHolder$loginControl$UserName",
            credential.username.clone(),
        ),
        (
            "ctl00$pageContentHolder$loginControl$Password",
            credential.password.clone(),
        ),
    ]
}

/// Body of the availability query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    site_id: String,
    resource_ids: Vec<String>,
    selected_date: String,
}

pub fn availability_query(date: NaiveDate, courts: &[Court]) -> AvailabilityQuery {
    AvailabilityQuery {
        site_id: SITE_ID.to_string(),
        resource_ids: courts.iter().map(|c| c.resource_id().to_string()).collect(),
        selected_date: site_date(date),
    }
}

/// Availability response envelope; the payload sits under `d.Value`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityEnvelope {
    pub d: AvailabilityResult,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityResult {
    #[serde(rename = "Value")]
    pub value: Vec<ResourceAvailability>,
}

impl AvailabilityEnvelope {
    pub fn into_resources(self) -> Vec<ResourceAvailability> {
        self.d.value
    }
}

/// Reservation intent, nested as a JSON string inside the stage body.
/// Field order matches the site's own frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScheduleInformation {
    schedule_date: String,
    duration: u32,
    resource: String,
    provider: String,
    site_id: u32,
    provider_id: u32,
    resource_id: String,
    service_id: u32,
    service_name: String,
    service_unique_identifier: String,
}

/// Body of the stage request. Both values travel as strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePayload {
    schedule_information: String,
    start_time: String,
}

/// Build the stage body for booking `court` at `hour` (24-hour) on `date`.
pub fn stage_payload(court: Court, hour: u8, date: NaiveDate) -> serde_json::Result<StagePayload> {
    let information = ScheduleInformation {
        schedule_date: site_date(date),
        duration: BOOKING_DURATION_MINUTES,
        resource: format!("{RESOURCE_NAME_PREFIX} {court}"),
        provider: String::new(),
        site_id: SITE_ID,
        provider_id: 0,
        resource_id: court.resource_id().to_string(),
        service_id: SERVICE_ID,
        service_name: SERVICE_NAME.to_string(),
        service_unique_identifier: SERVICE_UNIQUE_IDENTIFIER.to_string(),
    };
    Ok(StagePayload {
        schedule_information: serde_json::to_string(&information)?,
        start_time: (u16::from(hour) * 60).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn court(n: u8) -> Court {
        Court::new(n).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 3, 26).unwrap()
    }

    #[test]
    fn test_site_date_format() {
        assert_eq!(site_date(date()), "03/26/2017");
    }

    #[test]
    fn test_login_form_control_names() {
        let credential = Credential::new("alice", "hunter2");
        let form = login_form(&credential);
        assert_eq!(
            form[0],
            (
                "ctl00$pageContentHolder$loginControl$UserName",
                "alice".to_string()
            )
        );
        assert_eq!(
            form[1],
            (
                "ctl00$pageContentHolder$loginControl$Password",
                "hunter2".to_string()
            )
        );
    }

    #[test]
    fn test_availability_query_shape() {
        let courts: Vec<Court> = Court::all().collect();
        let query = availability_query(date(), &courts);
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "siteId": "1261",
                "resourceIds": ["17", "18", "19", "20", "21"],
                "selectedDate": "03/26/2017",
            })
        );
    }

    #[test]
    fn test_stage_payload_nests_schedule_information_as_string() {
        let payload = stage_payload(court(4), 20, date()).unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["startTime"], "1200");
        assert_eq!(
            value["scheduleInformation"],
            "{\"ScheduleDate\":\"03/26/2017\",\"Duration\":60,\
             \"Resource\":\"Zesiger Squash Court #4\",\"Provider\":\"\",\
             \"SiteId\":1261,\"ProviderId\":0,\"ResourceId\":\"20\",\
             \"ServiceId\":4,\"ServiceName\":\"Recreational Squash\",\
             \"ServiceUniqueIdentifier\":\"757170ab-4338-4ff6-868d-2fb51cc449f8\"}"
        );
    }

    #[test]
    fn test_stage_payload_start_time_is_minutes_since_midnight() {
        let payload = stage_payload(court(1), 7, date()).unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["startTime"], "420");
    }

    #[test]
    fn test_availability_envelope_deserializes() {
        let raw = r#"{
            "d": {
                "Value": [
                    {"Id": 17, "Availability": [{"TimeId": 1140, "IsAvailable": true}]},
                    {"Id": 18, "Availability": []}
                ]
            }
        }"#;
        let envelope: AvailabilityEnvelope = serde_json::from_str(raw).unwrap();
        let resources = envelope.into_resources();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id, 17);
        assert_eq!(resources[0].availability[0].time_id, 1140);
        assert!(resources[1].availability.is_empty());
    }
}
