use models::{FinancialProfile, InsurancePolicy, InsuranceType, Vehicle};

/// One-way sync from vehicle insurance policies into the vehicle list.
///
/// A vehicle policy with both a type and a registration number either marks
/// the matching vehicle as insured or appends a new one with a zero value for
/// the owner to fill in. Matching is keyed on the normalized registration
/// number, so running the sync twice changes nothing.
pub fn sync_vehicles_from_policies(policies: &[InsurancePolicy], vehicles: &mut Vec<Vehicle>) {
    for policy in policies {
        if policy.kind != Some(InsuranceType::Vehicle) {
            continue;
        }
        let Some(vehicle_type) = policy.vehicle_type else {
            continue;
        };
        let number = normalize_registration(&policy.vehicle_number);
        if number.is_empty() {
            continue;
        }

        match vehicles
            .iter_mut()
            .find(|v| normalize_registration(&v.registration_number) == number)
        {
            Some(existing) => existing.is_insured = true,
            None => vehicles.push(Vehicle {
                vehicle_type,
                name: format!("{vehicle_type} - {number}"),
                registration_number: number,
                estimated_value: 0.0,
                is_insured: true,
            }),
        }
    }
}

/// Apply the sync to a whole profile before it is saved.
pub fn reconcile_profile_vehicles(profile: &mut FinancialProfile) {
    let FinancialProfile {
        insurance_policies,
        vehicles,
        ..
    } = profile;
    sync_vehicles_from_policies(insurance_policies.as_slice(), vehicles);
}

fn normalize_registration(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
