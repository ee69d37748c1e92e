use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpecialtyRequest {
    pub name_ar: String,
    pub name_en: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpecialtyRequest {
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocationRequest {
    pub name_ar: String,
    pub name_en: Option<String>,
    pub city_ar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLocationRequest {
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub city_ar: Option<String>,
}
