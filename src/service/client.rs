use super::contains_ignore_case;
use crate::{Client, EntityKind, Error, Rental, Repository, Result, Shared};
use core::str::FromStr;

/// A client removed together with the rentals that referenced it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemovedClient {
    /// The removed client.
    pub client: Client,
    /// The rentals removed with the client, sorted by id.
    pub rentals: Vec<Rental>,
}

/// Fields of a client that can be searched.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClientField {
    /// The id.
    Id,
    /// The name.
    Name,
}

impl ClientField {
    /// All searchable fields.
    pub const ALL: [ClientField; 2] = [ClientField::Id, ClientField::Name];

    fn text(self, client: &Client) -> String {
        match self {
            ClientField::Id => client.id.to_string(),
            ClientField::Name => client.name.clone(),
        }
    }
}

impl FromStr for ClientField {
    type Err = Error;

    fn from_str(s: &str) -> Result<ClientField> {
        match s {
            "id" => Ok(ClientField::Id),
            "name" => Ok(ClientField::Name),
            _ => Err(Error::UnknownField {
                kind: EntityKind::Client,
                field: s.to_string(),
            }),
        }
    }
}

/// Adds, removes, updates and searches clients.
///
/// Removing a client also removes its rentals.
pub struct ClientService {
    clients: Shared<dyn Repository<Client>>,
    rentals: Shared<dyn Repository<Rental>>,
}

impl ClientService {
    /// Returns a new service over the two repositories.
    pub fn new(
        clients: Shared<dyn Repository<Client>>,
        rentals: Shared<dyn Repository<Rental>>,
    ) -> ClientService {
        ClientService { clients, rentals }
    }

    /// Adds a new client.
    pub fn add(&self, id: u32, name: &str) -> Result {
        self.clients.borrow_mut().add(Client::new(id, name))
    }

    /// Adds a client and some of its rentals.
    ///
    /// The rentals are stored as given, without the renting rules.
    pub fn add_client_and_rentals(&self, id: u32, name: &str, rentals: &[Rental]) -> Result {
        self.add(id, name)?;
        let mut repository = self.rentals.borrow_mut();
        for rental in rentals {
            repository.add(rental.clone())?;
        }
        Ok(())
    }

    /// Removes a client and all of its rentals.
    pub fn remove(&self, id: u32) -> Result<RemovedClient> {
        let client = self.clients.borrow_mut().remove(id)?;
        let rentals = self.rentals_for_client(id);
        let mut repository = self.rentals.borrow_mut();
        for rental in &rentals {
            repository.remove(rental.id)?;
        }
        log::debug!("removed client {} and {} rental(s)", id, rentals.len());
        Ok(RemovedClient { client, rentals })
    }

    /// Changes the name of a client and returns the client as it was before.
    pub fn update(&self, id: u32, name: &str) -> Result<Client> {
        self.clients.borrow_mut().update(Client::new(id, name))
    }

    /// Returns the client with the id.
    pub fn get(&self, id: u32) -> Result<Client> {
        self.clients.borrow().get(id).cloned()
    }

    /// Returns all clients sorted by id.
    pub fn list(&self) -> Vec<Client> {
        self.clients.borrow().all()
    }

    /// Returns the rentals of a client, whether the client exists or not.
    pub fn rentals_for_client(&self, id: u32) -> Vec<Rental> {
        self.rentals
            .borrow()
            .all()
            .into_iter()
            .filter(|rental| rental.client_id == id)
            .collect()
    }

    /// Returns the clients whose `field` contains `query`, ignoring case.
    pub fn search(&self, query: &str, field: ClientField) -> Vec<Client> {
        self.list()
            .into_iter()
            .filter(|client| contains_ignore_case(&field.text(client), query))
            .collect()
    }

    /// Returns the clients where any field contains `query`, ignoring case.
    pub fn search_all(&self, query: &str) -> Vec<Client> {
        self.list()
            .into_iter()
            .filter(|client| {
                ClientField::ALL
                    .iter()
                    .any(|field| contains_ignore_case(&field.text(client), query))
            })
            .collect()
    }
}
