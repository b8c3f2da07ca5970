use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::store::IdMap;

#[derive(Debug, thiserror::Error)]
#[error("Person with the same 'Name' already exists!")]
pub struct DuplicateName;

pub struct NewPerson {
    pub name: String,
    pub number: String,
}

/// In-memory phonebook. Persons are kept in memory in every deployment.
pub struct PersonRepository {
    persons: RwLock<IdMap<common::Person>>,
}

impl PersonRepository {
    pub fn new(seed: Vec<common::Person>) -> Self {
        let seed = seed
            .into_iter()
            .filter_map(|person| person.id.parse::<u64>().ok().map(|key| (key, person)));
        Self {
            persons: RwLock::new(IdMap::with_seed(seed)),
        }
    }

    pub fn seeded() -> Self {
        let person = |id: &str, name: &str, number: &str| common::Person {
            id: id.to_owned(),
            name: name.to_owned(),
            number: number.to_owned(),
        };
        Self::new(vec![
            person("1", "Arto Hellas", "040-123456"),
            person("2", "Ada Lovelace", "39-44-5323523"),
            person("3", "Dan Abramov", "12-43-234345"),
            person("4", "Mary Poppendieck", "39-23-6423122"),
        ])
    }

    pub async fn list(&self) -> Vec<common::Person> {
        self.persons.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<common::Person> {
        self.persons.read().await.get(id).cloned()
    }

    /// The uniqueness check and the insert happen under one write guard.
    pub async fn create(&self, person: NewPerson) -> Result<common::Person, DuplicateName> {
        let mut persons = self.persons.write().await;
        if persons.values().any(|existing| existing.name == person.name) {
            return Err(DuplicateName);
        }
        Ok(persons.insert_with(|id| common::Person {
            id,
            name: person.name,
            number: person.number,
        }))
    }

    pub async fn delete(&self, id: &str) {
        self.persons.write().await.remove(id);
    }

    pub async fn count(&self) -> usize {
        self.persons.read().await.len()
    }
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

pub(crate) async fn index(
    app_state: actix_web::web::Data<crate::AppState>,
) -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(app_state.persons.list().await)
}

pub(crate) async fn show(
    app_state: actix_web::web::Data<crate::AppState>,
    id: actix_web::web::Path<String>,
) -> Result<actix_web::HttpResponse, ApiError> {
    match app_state.persons.get(&id).await {
        Some(person) => Ok(actix_web::HttpResponse::Ok().json(person)),
        None => Err(ApiError::NotFound),
    }
}

pub(crate) async fn create(
    app_state: actix_web::web::Data<crate::AppState>,
    req: actix_web::HttpRequest,
    body: actix_web::web::Bytes,
) -> Result<actix_web::HttpResponse, ApiError> {
    let payload: common::NewPersonPayload = crate::payload::json_or_default(&req, &body)?;
    // Name is checked first; a body missing both only reports the name.
    let name = required(payload.name).ok_or_else(|| ApiError::BadRequest("Name is missing".into()))?;
    let number =
        required(payload.number).ok_or_else(|| ApiError::BadRequest("Number is missing".into()))?;

    let person = app_state
        .persons
        .create(NewPerson { name, number })
        .await
        .map_err(|duplicate| ApiError::BadRequest(duplicate.to_string()))?;
    Ok(actix_web::HttpResponse::Ok().json(person))
}

pub(crate) async fn delete(
    app_state: actix_web::web::Data<crate::AppState>,
    id: actix_web::web::Path<String>,
) -> actix_web::HttpResponse {
    app_state.persons.delete(&id).await;
    actix_web::HttpResponse::NoContent().finish()
}

pub(crate) async fn info(app_state: actix_web::web::Data<crate::AppState>) -> actix_web::HttpResponse {
    let count = app_state.persons.count().await;
    let now = chrono::Local::now().format("%a %b %d %Y %H:%M:%S GMT%z");
    actix_web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<p>Phonebook has info for {} people</p>\n<p>{}</p>",
            count, now
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_person(name: &str, number: &str) -> NewPerson {
        NewPerson {
            name: name.to_owned(),
            number: number.to_owned(),
        }
    }

    #[actix_web::test]
    async fn duplicate_names_are_rejected_regardless_of_number() {
        let repository = PersonRepository::seeded();
        let result = repository.create(new_person("Arto Hellas", "000")).await;
        assert!(result.is_err());
        assert_eq!(repository.count().await, 4);
    }

    #[actix_web::test]
    async fn name_match_is_case_sensitive() {
        let repository = PersonRepository::seeded();
        let person = repository
            .create(new_person("arto hellas", "000"))
            .await
            .unwrap();
        assert_eq!(person.id, "5");
        assert_eq!(repository.count().await, 5);
    }

    #[actix_web::test]
    async fn freed_ids_are_not_reassigned() {
        let repository = PersonRepository::seeded();
        repository.delete("4").await;
        let person = repository
            .create(new_person("Grace Hopper", "1-2-3"))
            .await
            .unwrap();
        assert_eq!(person.id, "5");
        assert!(repository.get("4").await.is_none());
    }

    #[test]
    fn empty_strings_count_as_missing() {
        assert!(required(Some(String::new())).is_none());
        assert!(required(None).is_none());
        assert_eq!(required(Some("x".into())).as_deref(), Some("x"));
    }
}
