use super::prelude::*;
use crate::repositories::Error as RepoError;
use std::cell::RefCell;

type RepoResult<T> = std::result::Result<T, RepoError>;

trait Key {
    fn key(&self) -> &str;
}

impl Key for User {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for ExperiencedRoute {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for InexperiencedRoute {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Key for BuddyRequest {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

fn get<T: Clone + Key>(objects: &[T], id: &str) -> RepoResult<T> {
    objects
        .iter()
        .find(|x| x.key() == id)
        .cloned()
        .ok_or(RepoError::NotFound)
}

fn create<T: Clone + Key>(objects: &mut Vec<T>, e: T) -> RepoResult<()> {
    if objects.iter().any(|x| x.key() == e.key()) {
        return Err(RepoError::AlreadyExists);
    }
    objects.push(e);
    Ok(())
}

fn update<T: Clone + Key>(objects: &mut [T], e: &T) -> RepoResult<()> {
    let x = objects
        .iter_mut()
        .find(|x| x.key() == e.key())
        .ok_or(RepoError::NotFound)?;
    *x = e.clone();
    Ok(())
}

#[derive(Debug, Default)]
pub struct MockDb {
    pub users: RefCell<Vec<User>>,
    pub experienced_routes: RefCell<Vec<ExperiencedRoute>>,
    pub inexperienced_routes: RefCell<Vec<InexperiencedRoute>>,
    pub buddy_requests: RefCell<Vec<BuddyRequest>>,
}

impl MockDb {
    pub fn user(&self, id: &str) -> User {
        get(&self.users.borrow(), id).unwrap()
    }

    pub fn buddy_request(&self, id: &str) -> BuddyRequest {
        get(&self.buddy_requests.borrow(), id).unwrap()
    }
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        create(&mut self.users.borrow_mut(), user.clone())
    }
    fn update_user(&self, user: &User) -> RepoResult<()> {
        update(&mut self.users.borrow_mut(), user)
    }
    fn delete_user(&self, id: &str) -> RepoResult<()> {
        let mut users = self.users.borrow_mut();
        let len = users.len();
        users.retain(|u| u.id != id);
        if users.len() == len {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
    fn get_user(&self, id: &str) -> RepoResult<User> {
        get(&self.users.borrow(), id)
    }
}

impl ExperiencedRouteRepo for MockDb {
    fn create_experienced_route(&self, route: &ExperiencedRoute) -> RepoResult<()> {
        create(&mut self.experienced_routes.borrow_mut(), route.clone())
    }
    fn update_experienced_route(&self, route: &ExperiencedRoute) -> RepoResult<()> {
        update(&mut self.experienced_routes.borrow_mut(), route)
    }
    fn get_experienced_route(&self, id: &str) -> RepoResult<ExperiencedRoute> {
        get(&self.experienced_routes.borrow(), id)
    }
    fn experienced_routes_of_owner(&self, owner: &str) -> RepoResult<Vec<ExperiencedRoute>> {
        Ok(self
            .experienced_routes
            .borrow()
            .iter()
            .filter(|r| r.owner == owner && !r.deleted)
            .cloned()
            .collect())
    }
    fn delete_experienced_routes_of_owner(&self, owner: &str) -> RepoResult<usize> {
        let mut count = 0;
        for r in self
            .experienced_routes
            .borrow_mut()
            .iter_mut()
            .filter(|r| r.owner == owner && !r.deleted)
        {
            r.deleted = true;
            count += 1;
        }
        Ok(count)
    }
    fn experienced_route_candidates(
        &self,
        requester: &str,
        day: Weekday,
    ) -> RepoResult<Vec<ExperiencedRoute>> {
        Ok(self
            .experienced_routes
            .borrow()
            .iter()
            .filter(|r| !r.deleted && r.owner != requester && r.days.contains(day))
            .cloned()
            .collect())
    }
}

impl InexperiencedRouteRepo for MockDb {
    fn create_inexperienced_route(&self, route: &InexperiencedRoute) -> RepoResult<()> {
        create(&mut self.inexperienced_routes.borrow_mut(), route.clone())
    }
    fn update_inexperienced_route(&self, route: &InexperiencedRoute) -> RepoResult<()> {
        update(&mut self.inexperienced_routes.borrow_mut(), route)
    }
    fn get_inexperienced_route(&self, id: &str) -> RepoResult<InexperiencedRoute> {
        get(&self.inexperienced_routes.borrow(), id)
    }
    fn inexperienced_routes_of_owner(&self, owner: &str) -> RepoResult<Vec<InexperiencedRoute>> {
        Ok(self
            .inexperienced_routes
            .borrow()
            .iter()
            .filter(|r| r.owner == owner && !r.deleted)
            .cloned()
            .collect())
    }
    fn delete_inexperienced_routes_of_owner(&self, owner: &str) -> RepoResult<usize> {
        let mut count = 0;
        for r in self
            .inexperienced_routes
            .borrow_mut()
            .iter_mut()
            .filter(|r| r.owner == owner && !r.deleted)
        {
            r.deleted = true;
            count += 1;
        }
        Ok(count)
    }
}

impl BuddyRequestRepo for MockDb {
    fn create_buddy_request(&self, request: &BuddyRequest) -> RepoResult<()> {
        create(&mut self.buddy_requests.borrow_mut(), request.clone())
    }
    fn update_buddy_request(&self, request: &BuddyRequest) -> RepoResult<()> {
        update(&mut self.buddy_requests.borrow_mut(), request)
    }
    fn get_buddy_request(&self, id: &str) -> RepoResult<BuddyRequest> {
        get(&self.buddy_requests.borrow(), id)
    }
    fn buddy_requests_of_user(&self, user: &str) -> RepoResult<Vec<BuddyRequest>> {
        let mut requests: Vec<_> = self
            .buddy_requests
            .borrow()
            .iter()
            .filter(|r| r.owner == user || r.experienced_user == user)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.updated.cmp(&a.updated));
        Ok(requests)
    }
    fn active_buddy_requests_referencing(
        &self,
        reference: BuddyRequestReference<'_>,
    ) -> RepoResult<Vec<BuddyRequest>> {
        Ok(self
            .buddy_requests
            .borrow()
            .iter()
            .filter(|r| !r.status.is_terminal())
            .filter(|r| match reference {
                BuddyRequestReference::ExperiencedRoute(id) => r.experienced_route == id,
                BuddyRequestReference::InexperiencedRoute(id) => r.inexperienced_route == id,
                BuddyRequestReference::User(id) => r.owner == id || r.experienced_user == id,
            })
            .cloned()
            .collect())
    }
    fn cancel_buddy_requests(
        &self,
        ids: &[&str],
        reason: &str,
        updated: Timestamp,
    ) -> RepoResult<usize> {
        let mut count = 0;
        for r in self
            .buddy_requests
            .borrow_mut()
            .iter_mut()
            .filter(|r| ids.contains(&r.id.as_str()) && !r.status.is_terminal())
        {
            r.status = BuddyRequestStatus::Canceled;
            r.reason = reason.to_owned();
            r.updated = updated;
            count += 1;
        }
        Ok(count)
    }
}
