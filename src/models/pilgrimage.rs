// src/models/pilgrimage.rs

//! Pilgrimage tour application data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Every field of the pilgrimage application, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PilgrimageField {
    // Personal
    FullName,
    DateOfBirth,
    Gender,
    Nationality,
    PassportNumber,
    PassportIssueDate,
    PassportExpiryDate,
    PlaceOfBirth,
    // Contact
    Email,
    Phone,
    AlternatePhone,
    Address,
    City,
    Country,
    // Church
    ChurchName,
    ChurchAddress,
    PastorName,
    PastorPhone,
    MembershipYears,
    // Travel
    PreviousTravel,
    MedicalConditions,
    DietaryRequirements,
    EmergencyContactName,
    EmergencyContactPhone,
    EmergencyContactRelationship,
    // Additional
    SpecialRequests,
    HowDidYouHear,
}

impl PilgrimageField {
    pub const ALL: [PilgrimageField; 27] = [
        Self::FullName,
        Self::DateOfBirth,
        Self::Gender,
        Self::Nationality,
        Self::PassportNumber,
        Self::PassportIssueDate,
        Self::PassportExpiryDate,
        Self::PlaceOfBirth,
        Self::Email,
        Self::Phone,
        Self::AlternatePhone,
        Self::Address,
        Self::City,
        Self::Country,
        Self::ChurchName,
        Self::ChurchAddress,
        Self::PastorName,
        Self::PastorPhone,
        Self::MembershipYears,
        Self::PreviousTravel,
        Self::MedicalConditions,
        Self::DietaryRequirements,
        Self::EmergencyContactName,
        Self::EmergencyContactPhone,
        Self::EmergencyContactRelationship,
        Self::SpecialRequests,
        Self::HowDidYouHear,
    ];

    pub const REQUIRED: [PilgrimageField; 14] = [
        Self::FullName,
        Self::DateOfBirth,
        Self::Gender,
        Self::Nationality,
        Self::PassportNumber,
        Self::PassportExpiryDate,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::Country,
        Self::ChurchName,
        Self::EmergencyContactName,
        Self::EmergencyContactPhone,
    ];

    /// Wire and form name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::DateOfBirth => "dateOfBirth",
            Self::Gender => "gender",
            Self::Nationality => "nationality",
            Self::PassportNumber => "passportNumber",
            Self::PassportIssueDate => "passportIssueDate",
            Self::PassportExpiryDate => "passportExpiryDate",
            Self::PlaceOfBirth => "placeOfBirth",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::AlternatePhone => "alternatePhone",
            Self::Address => "address",
            Self::City => "city",
            Self::Country => "country",
            Self::ChurchName => "churchName",
            Self::ChurchAddress => "churchAddress",
            Self::PastorName => "pastorName",
            Self::PastorPhone => "pastorPhone",
            Self::MembershipYears => "membershipYears",
            Self::PreviousTravel => "previousTravel",
            Self::MedicalConditions => "medicalConditions",
            Self::DietaryRequirements => "dietaryRequirements",
            Self::EmergencyContactName => "emergencyContactName",
            Self::EmergencyContactPhone => "emergencyContactPhone",
            Self::EmergencyContactRelationship => "emergencyContactRelationship",
            Self::SpecialRequests => "specialRequests",
            Self::HowDidYouHear => "howDidYouHear",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for PilgrimageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PilgrimageField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("unknown application field '{s}'")))
    }
}

/// Flat pilgrimage application record, as typed by the applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PilgrimageApplication {
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub nationality: String,
    pub passport_number: String,
    pub passport_issue_date: String,
    pub passport_expiry_date: String,
    pub place_of_birth: String,

    pub email: String,
    pub phone: String,
    pub alternate_phone: String,
    pub address: String,
    pub city: String,
    pub country: String,

    pub church_name: String,
    pub church_address: String,
    pub pastor_name: String,
    pub pastor_phone: String,
    pub membership_years: String,

    pub previous_travel: String,
    pub medical_conditions: String,
    pub dietary_requirements: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relationship: String,

    pub special_requests: String,
    pub how_did_you_hear: String,
}

impl PilgrimageApplication {
    pub fn get(&self, field: PilgrimageField) -> &str {
        use PilgrimageField as F;
        match field {
            F::FullName => &self.full_name,
            F::DateOfBirth => &self.date_of_birth,
            F::Gender => &self.gender,
            F::Nationality => &self.nationality,
            F::PassportNumber => &self.passport_number,
            F::PassportIssueDate => &self.passport_issue_date,
            F::PassportExpiryDate => &self.passport_expiry_date,
            F::PlaceOfBirth => &self.place_of_birth,
            F::Email => &self.email,
            F::Phone => &self.phone,
            F::AlternatePhone => &self.alternate_phone,
            F::Address => &self.address,
            F::City => &self.city,
            F::Country => &self.country,
            F::ChurchName => &self.church_name,
            F::ChurchAddress => &self.church_address,
            F::PastorName => &self.pastor_name,
            F::PastorPhone => &self.pastor_phone,
            F::MembershipYears => &self.membership_years,
            F::PreviousTravel => &self.previous_travel,
            F::MedicalConditions => &self.medical_conditions,
            F::DietaryRequirements => &self.dietary_requirements,
            F::EmergencyContactName => &self.emergency_contact_name,
            F::EmergencyContactPhone => &self.emergency_contact_phone,
            F::EmergencyContactRelationship => &self.emergency_contact_relationship,
            F::SpecialRequests => &self.special_requests,
            F::HowDidYouHear => &self.how_did_you_hear,
        }
    }

    pub fn set(&mut self, field: PilgrimageField, value: impl Into<String>) {
        use PilgrimageField as F;
        let slot = match field {
            F::FullName => &mut self.full_name,
            F::DateOfBirth => &mut self.date_of_birth,
            F::Gender => &mut self.gender,
            F::Nationality => &mut self.nationality,
            F::PassportNumber => &mut self.passport_number,
            F::PassportIssueDate => &mut self.passport_issue_date,
            F::PassportExpiryDate => &mut self.passport_expiry_date,
            F::PlaceOfBirth => &mut self.place_of_birth,
            F::Email => &mut self.email,
            F::Phone => &mut self.phone,
            F::AlternatePhone => &mut self.alternate_phone,
            F::Address => &mut self.address,
            F::City => &mut self.city,
            F::Country => &mut self.country,
            F::ChurchName => &mut self.church_name,
            F::ChurchAddress => &mut self.church_address,
            F::PastorName => &mut self.pastor_name,
            F::PastorPhone => &mut self.pastor_phone,
            F::MembershipYears => &mut self.membership_years,
            F::PreviousTravel => &mut self.previous_travel,
            F::MedicalConditions => &mut self.medical_conditions,
            F::DietaryRequirements => &mut self.dietary_requirements,
            F::EmergencyContactName => &mut self.emergency_contact_name,
            F::EmergencyContactPhone => &mut self.emergency_contact_phone,
            F::EmergencyContactRelationship => &mut self.emergency_contact_relationship,
            F::SpecialRequests => &mut self.special_requests,
            F::HowDidYouHear => &mut self.how_did_you_hear,
        };
        *slot = value.into();
    }

    /// Build the backend payload. Blank optional values are sent as null.
    pub fn to_request(&self) -> PilgrimageRequest {
        PilgrimageRequest {
            customer: PilgrimageCustomer {
                full_name: self.full_name.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                date_of_birth: non_blank(&self.date_of_birth),
                gender: non_blank(&self.gender),
                nationality: non_blank(&self.nationality),
                passport_number: non_blank(&self.passport_number),
                passport_issue_date: non_blank(&self.passport_issue_date),
                passport_expiry_date: non_blank(&self.passport_expiry_date),
                place_of_birth: non_blank(&self.place_of_birth),
                address: non_blank(&self.address),
                city: non_blank(&self.city),
                country: non_blank(&self.country),
                alternate_phone: non_blank(&self.alternate_phone),
            },
            booking: PilgrimageBookingInfo {
                church_name: non_blank(&self.church_name),
                church_address: non_blank(&self.church_address),
                pastor_name: non_blank(&self.pastor_name),
                pastor_phone: non_blank(&self.pastor_phone),
                membership_years: non_blank(&self.membership_years),
                previous_travel: non_blank(&self.previous_travel),
                medical_conditions: non_blank(&self.medical_conditions),
                dietary_requirements: non_blank(&self.dietary_requirements),
                emergency_contact_name: non_blank(&self.emergency_contact_name),
                emergency_contact_phone: non_blank(&self.emergency_contact_phone),
                emergency_contact_relationship: non_blank(&self.emergency_contact_relationship),
                special_requests: non_blank(&self.special_requests),
                how_did_you_hear: non_blank(&self.how_did_you_hear),
                tour_dates: None,
                tour_cost: None,
            },
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PilgrimageCustomer {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub passport_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_issue_date: Option<String>,
    #[serde(default)]
    pub passport_expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub alternate_phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PilgrimageBookingInfo {
    /// Filled in by the backend when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_dates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_cost: Option<String>,
    pub church_name: Option<String>,
    pub church_address: Option<String>,
    pub pastor_name: Option<String>,
    pub pastor_phone: Option<String>,
    pub membership_years: Option<String>,
    pub previous_travel: Option<String>,
    pub medical_conditions: Option<String>,
    pub dietary_requirements: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub special_requests: Option<String>,
    pub how_did_you_hear: Option<String>,
}

/// Body of `POST /api/pilgrimage-bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PilgrimageRequest {
    pub customer: PilgrimageCustomer,
    pub booking: PilgrimageBookingInfo,
}

/// Pilgrimage booking record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PilgrimageBooking {
    pub id: String,
    pub customer: PilgrimageCustomer,
    #[serde(default)]
    pub booking: PilgrimageBookingInfo,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Identity fields handed from the application to its confirmation view.
///
/// Every field defaults, so partial or missing data still reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationSummary {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub booking_id: Option<String>,
}

impl ApplicationSummary {
    pub fn from_application(application: &PilgrimageApplication, booking_id: Option<String>) -> Self {
        Self {
            full_name: application.full_name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            booking_id,
        }
    }

    /// The confirmation view only shows details when a name is present.
    pub fn has_details(&self) -> bool {
        !self.full_name.is_empty()
    }
}
