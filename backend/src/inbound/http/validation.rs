//! Request payload validation for the listing and review routes.
//!
//! Payloads arrive as JSON with the fields nested under a `restaurant` or
//! `review` wrapper key. Every field violation is collected before failing,
//! so the client sees the whole problem at once: the fragments are joined
//! with `", "` into a single `400 Bad Request` message. A successful parse
//! yields a validated domain draft, so nothing downstream touches raw input.

use serde_json::Value;

use crate::domain::{Error, ImageUpload, RestaurantDraft, ReviewDraft, RATING_MAX, RATING_MIN};

/// Accumulates one human-readable fragment per violated rule.
#[derive(Debug, Default)]
struct Violations(Vec<String>);

impl Violations {
    fn push(&mut self, fragment: impl Into<String>) {
        self.0.push(fragment.into());
    }

    fn into_result(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_request(self.0.join(", ")))
        }
    }
}

fn parse_json(raw: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(raw)
        .map_err(|err| Error::invalid_request(format!("request body must be valid JSON: {err}")))
}

/// Pull the wrapper object out of the payload root.
fn wrapper<'a>(root: &'a Value, key: &str, violations: &mut Violations) -> Option<&'a Value> {
    match root.get(key) {
        None | Some(Value::Null) => {
            violations.push(format!("\"{key}\" is required"));
            None
        }
        Some(inner) if !inner.is_object() => {
            violations.push(format!("\"{key}\" must be of type object"));
            None
        }
        Some(inner) => Some(inner),
    }
}

/// Required non-blank string field.
fn string_field(obj: &Value, field: &str, violations: &mut Violations) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            violations.push(format!("\"{field}\" is required"));
            None
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            violations.push(format!("\"{field}\" is not allowed to be empty"));
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            violations.push(format!("\"{field}\" must be a string"));
            None
        }
    }
}

fn price_field(obj: &Value, violations: &mut Violations) -> Option<f64> {
    match obj.get("price") {
        None | Some(Value::Null) => {
            violations.push("\"price\" is required");
            None
        }
        Some(Value::Number(number)) => {
            let value = number.as_f64()?;
            if value < 0.0 {
                violations.push("\"price\" must be greater than or equal to 0");
                None
            } else {
                Some(value)
            }
        }
        Some(_) => {
            violations.push("\"price\" must be a number");
            None
        }
    }
}

fn rating_field(obj: &Value, violations: &mut Violations) -> Option<i64> {
    match obj.get("rating") {
        None | Some(Value::Null) => {
            violations.push("\"rating\" is required");
            None
        }
        Some(Value::Number(number)) => match number.as_i64() {
            Some(value) if (RATING_MIN..=RATING_MAX).contains(&value) => Some(value),
            Some(_) => {
                violations.push(format!(
                    "\"rating\" must be between {RATING_MIN} and {RATING_MAX}"
                ));
                None
            }
            None => {
                violations.push("\"rating\" must be an integer");
                None
            }
        },
        Some(_) => {
            violations.push("\"rating\" must be a number");
            None
        }
    }
}

/// Optional top-level image upload list; absent means no new images.
fn images_field(root: &Value, violations: &mut Violations) -> Vec<ImageUpload> {
    match root.get("images") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => match serde_json::from_value::<Vec<ImageUpload>>(value.clone()) {
            Ok(uploads) => uploads,
            Err(_) => {
                violations.push("\"images\" must be an array of uploads");
                Vec::new()
            }
        },
    }
}

/// Validate a listing payload into a domain draft plus pending uploads.
pub fn parse_restaurant_payload(raw: &[u8]) -> Result<(RestaurantDraft, Vec<ImageUpload>), Error> {
    let root = parse_json(raw)?;
    let mut violations = Violations::default();

    let mut title = None;
    let mut location = None;
    let mut price = None;
    let mut description = None;
    if let Some(inner) = wrapper(&root, "restaurant", &mut violations) {
        title = string_field(inner, "title", &mut violations);
        location = string_field(inner, "location", &mut violations);
        price = price_field(inner, &mut violations);
        description = string_field(inner, "description", &mut violations);
    }
    let uploads = images_field(&root, &mut violations);
    violations.into_result()?;

    // All four are present once validation passed.
    let (Some(title), Some(location), Some(price), Some(description)) =
        (title, location, price, description)
    else {
        return Err(Error::internal("validated listing payload was incomplete"));
    };
    let draft = RestaurantDraft::try_new(title, location, price, description)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    Ok((draft, uploads))
}

/// Validate a review payload into a domain draft.
pub fn parse_review_payload(raw: &[u8]) -> Result<ReviewDraft, Error> {
    let root = parse_json(raw)?;
    let mut violations = Violations::default();

    let mut rating = None;
    let mut body = None;
    if let Some(inner) = wrapper(&root, "review", &mut violations) {
        rating = rating_field(inner, &mut violations);
        body = string_field(inner, "body", &mut violations);
    }
    violations.into_result()?;

    let (Some(rating), Some(body)) = (rating, body) else {
        return Err(Error::internal("validated review payload was incomplete"));
    };
    ReviewDraft::try_new(rating, body).map_err(|err| Error::invalid_request(err.to_string()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;

    fn restaurant_error(payload: Value) -> String {
        let raw = serde_json::to_vec(&payload).expect("serializable payload");
        let err = parse_restaurant_payload(&raw).expect_err("payload should be rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        err.message().to_owned()
    }

    fn review_error(payload: Value) -> String {
        let raw = serde_json::to_vec(&payload).expect("serializable payload");
        let err = parse_review_payload(&raw).expect_err("payload should be rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        err.message().to_owned()
    }

    #[test]
    fn accepts_a_complete_listing_payload() {
        let raw = serde_json::to_vec(&json!({
            "restaurant": {
                "title": "Bobby Snacks",
                "location": "Asansol",
                "price": 250,
                "description": "Best Paneer Chilli in town"
            },
            "images": [{ "file_name": "listings/abc123" }]
        }))
        .expect("serializable payload");

        let (draft, uploads) = parse_restaurant_payload(&raw).expect("valid payload");
        assert_eq!(draft.title, "Bobby Snacks");
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file_name, "listings/abc123");
    }

    #[test]
    fn missing_wrapper_is_a_single_fragment() {
        let message = restaurant_error(json!({ "title": "No wrapper" }));
        assert_eq!(message, "\"restaurant\" is required");
    }

    #[test]
    fn every_missing_field_contributes_a_fragment() {
        let message = restaurant_error(json!({ "restaurant": { "title": "Only a title" } }));
        assert!(message.contains("\"location\" is required"));
        assert!(message.contains("\"price\" is required"));
        assert!(message.contains("\"description\" is required"));
        assert_eq!(message.matches(", ").count(), 2);
    }

    #[rstest]
    #[case(json!({ "restaurant": {
        "title": 42, "location": "Asansol", "price": 10, "description": "ok"
    } }), "\"title\" must be a string")]
    #[case(json!({ "restaurant": {
        "title": "T", "location": "L", "price": -1, "description": "ok"
    } }), "\"price\" must be greater than or equal to 0")]
    #[case(json!({ "restaurant": {
        "title": "T", "location": "L", "price": "cheap", "description": "ok"
    } }), "\"price\" must be a number")]
    #[case(json!({ "restaurant": {
        "title": "   ", "location": "L", "price": 1, "description": "ok"
    } }), "\"title\" is not allowed to be empty")]
    fn listing_field_violations(#[case] payload: Value, #[case] expected: &str) {
        assert_eq!(restaurant_error(payload), expected);
    }

    #[rstest]
    #[case(json!({ "review": { "rating": 0, "body": "ok" } }),
        "\"rating\" must be between 1 and 5")]
    #[case(json!({ "review": { "rating": 6, "body": "ok" } }),
        "\"rating\" must be between 1 and 5")]
    #[case(json!({ "review": { "rating": 3.5, "body": "ok" } }),
        "\"rating\" must be an integer")]
    #[case(json!({ "review": { "rating": "three", "body": "ok" } }),
        "\"rating\" must be a number")]
    #[case(json!({ "review": { "rating": 3 } }), "\"body\" is required")]
    #[case(json!({}), "\"review\" is required")]
    fn review_field_violations(#[case] payload: Value, #[case] expected: &str) {
        assert_eq!(review_error(payload), expected);
    }

    #[test]
    fn review_violations_aggregate() {
        let message = review_error(json!({ "review": { "rating": 9, "body": "" } }));
        assert_eq!(
            message,
            "\"rating\" must be between 1 and 5, \"body\" is not allowed to be empty"
        );
    }

    #[test]
    fn malformed_json_is_a_client_error() {
        let err = parse_review_payload(b"not json").expect_err("invalid JSON");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[test]
    fn accepts_a_valid_review_payload() {
        let raw = serde_json::to_vec(&json!({ "review": { "rating": 3, "body": "ok" } }))
            .expect("serializable payload");
        let draft = parse_review_payload(&raw).expect("valid payload");
        assert_eq!(draft.rating.value(), 3);
    }
}
