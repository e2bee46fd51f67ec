/// Endpoint smoke test for a locally running DocSpot API.
///
/// Start the server (in-memory store is fine):
///
///   cargo run -p docspot-api
///
/// then run this binary:
///
///   cargo run -p endpoint-integration-tests --bin endpoint_tests
///
/// It drives the whole platform flow through the real HTTP surface:
/// doctor registration, admin approval, patient booking, and the doctor's
/// confirm/complete decisions. The server holds one active session, so the
/// script re-logs-in as each actor the way a browser user would.
use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000";

struct ApiTestClient {
    client: Client,
    base_url: String,
}

impl ApiTestClient {
    fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::check(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn check(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if status != StatusCode::OK {
            return Err(anyhow!("unexpected status {}: {}", status, body));
        }
        Ok(body)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Value> {
        self.post("/auth/login", json!({ "email": email, "password": password }))
            .await
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let api = ApiTestClient::new();

    // Server up?
    let health = api
        .client
        .get(BASE_URL)
        .send()
        .await
        .map_err(|e| anyhow!("is the DocSpot API running on {}? ({})", BASE_URL, e))?;
    println!("✅ server reachable ({})", health.status());

    // Doctor registers and waits for approval.
    let doctor = api
        .post(
            "/auth/register",
            json!({
                "name": "Dr. Live Test",
                "email": "dr.live@docspot.test",
                "password": "Doctor-pass-1",
                "role": "doctor",
                "specialization": "Cardiology",
                "experience_years": 9,
                "education": "MD",
                "consultation_fee": 1100
            }),
        )
        .await?;
    let doctor_id = doctor["user"]["id"]
        .as_str()
        .ok_or_else(|| anyhow!("missing doctor id"))?
        .to_string();
    assert_eq!(doctor["user"]["is_approved"], json!(false));
    println!("✅ doctor registered (pending approval): {}", doctor_id);

    // Admin registers, sees the pending doctor, approves.
    api.post(
        "/auth/register",
        json!({
            "name": "Live Admin",
            "email": "admin@docspot.test",
            "password": "Admin-pass-1",
            "role": "admin"
        }),
    )
    .await?;

    let pending = api.get("/doctors/pending").await?;
    println!(
        "✅ admin sees {} pending doctor(s)",
        pending["doctors"].as_array().map(Vec::len).unwrap_or(0)
    );

    api.post(&format!("/doctors/{}/approve", doctor_id), json!({}))
        .await?;
    println!("✅ doctor approved");

    // Patient registers and books with the approved doctor.
    api.post(
        "/auth/register",
        json!({
            "name": "Live Patient",
            "email": "patient@docspot.test",
            "password": "Patient-pass-1",
            "role": "patient"
        }),
    )
    .await?;

    let catalog = api.get("/doctors").await?;
    println!(
        "✅ catalog lists {} bookable doctor(s)",
        catalog["count"].as_u64().unwrap_or(0)
    );

    let booked = api
        .post(
            "/appointments",
            json!({
                "doctor_id": doctor_id,
                "date": "2025-03-01",
                "time": "10:00",
                "reason": "checkup",
                "patient_age": 30
            }),
        )
        .await?;
    let appointment_id = booked["appointment"]["id"]
        .as_u64()
        .ok_or_else(|| anyhow!("missing appointment id"))?;
    assert_eq!(booked["appointment"]["status"], json!("pending"));
    println!("✅ appointment {} booked (pending)", appointment_id);

    // Doctor signs in, confirms, completes with notes.
    api.login("dr.live@docspot.test", "Doctor-pass-1").await?;

    let confirmed = api
        .post(&format!("/appointments/{}/confirm", appointment_id), json!({}))
        .await?;
    assert_eq!(confirmed["appointment"]["status"], json!("confirmed"));
    println!("✅ appointment confirmed");

    let completed = api
        .post(
            &format!("/appointments/{}/complete", appointment_id),
            json!({ "notes": "ok" }),
        )
        .await?;
    assert_eq!(completed["appointment"]["status"], json!("completed"));
    println!("✅ appointment completed with notes");

    // A second cancel/confirm on a terminal appointment must fail.
    let illegal = api
        .post(&format!("/appointments/{}/cancel", appointment_id), json!({}))
        .await;
    assert!(illegal.is_err());
    println!("✅ terminal appointment rejects further transitions");

    // Admin dashboard aggregates.
    api.login("admin@docspot.test", "Admin-pass-1").await?;
    let dashboard = api.get("/dashboard/admin").await?;
    println!(
        "✅ admin dashboard: {} patient(s), {} appointment(s)",
        dashboard["overview"]["total_patients"],
        dashboard["overview"]["total_appointments"]
    );

    println!("\nAll endpoint checks passed.");
    Ok(())
}
