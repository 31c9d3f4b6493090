//! In-memory repository fakes shared by the integration tests.
//!
//! These behave like the real stores over a `Vec` guarded by a mutex,
//! including the unique-email rejection the database index provides.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use servicehub::domain::{
    Booking, BookingStatus, NewBooking, NewService, NewUser, Profile, ProfileUpdate, Service,
    ServiceFilter, ServiceSort, ServiceUpdate, User,
};
use servicehub::errors::{AppError, AppResult};
use servicehub::infra::{
    BookingRepository, Repositories, ServiceRepository, UserRepository,
};

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl InMemoryUsers {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, new: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();

        // Mirrors the unique index on users.email
        if users.iter().any(|u| u.email == new.email) {
            return Err(AppError::conflict("User"));
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            profile: new.profile,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: i32, changes: ProfileUpdate) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        match &mut user.profile {
            Profile::Customer(c) => {
                if let Some(phone) = changes.phone {
                    c.phone = Some(phone);
                }
                if let Some(pic) = changes.profile_pic {
                    c.profile_pic = Some(pic);
                }
            }
            Profile::Provider(p) => {
                if let Some(phone) = changes.phone {
                    p.phone = Some(phone);
                }
                if let Some(pic) = changes.profile_pic {
                    p.profile_pic = Some(pic);
                }
                if let Some(business_name) = changes.business_name {
                    p.business_name = Some(business_name);
                }
                if let Some(bio) = changes.bio {
                    p.bio = Some(bio);
                }
                if let Some(areas) = changes.service_areas {
                    p.service_areas = areas;
                }
                if let Some(years) = changes.experience_years {
                    p.experience_years = years;
                }
            }
            Profile::Admin => {}
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

// =============================================================================
// Services
// =============================================================================

#[derive(Default)]
pub struct InMemoryServices {
    services: Mutex<Vec<Service>>,
    next_id: AtomicI32,
}

#[async_trait]
impl ServiceRepository for InMemoryServices {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        Ok(self
            .services
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list_public(&self, filter: ServiceFilter) -> AppResult<Vec<Service>> {
        let mut matches: Vec<Service> = self
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_active)
            .filter(|s| {
                filter.search.as_ref().map_or(true, |q| {
                    s.title.contains(q) || s.category.contains(q) || s.description.contains(q)
                })
            })
            .filter(|s| filter.category.as_ref().map_or(true, |c| &s.category == c))
            .filter(|s| filter.min_price.map_or(true, |p| s.price >= p))
            .filter(|s| filter.max_price.map_or(true, |p| s.price <= p))
            .filter(|s| filter.min_rating.map_or(true, |r| s.rating >= r))
            .cloned()
            .collect();

        match filter.sort {
            Some(ServiceSort::PriceLow) => {
                matches.sort_by(|a, b| a.price.total_cmp(&b.price))
            }
            Some(ServiceSort::PriceHigh) => {
                matches.sort_by(|a, b| b.price.total_cmp(&a.price))
            }
            Some(ServiceSort::Rating) => {
                matches.sort_by(|a, b| b.rating.total_cmp(&a.rating))
            }
            None => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(matches)
    }

    async fn list_by_provider(&self, provider_id: i32) -> AppResult<Vec<Service>> {
        Ok(self
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.provider_id == provider_id)
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> AppResult<Vec<String>> {
        let mut categories: Vec<String> = self
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn create(&self, new: NewService) -> AppResult<Service> {
        let now = Utc::now();
        let service = Service {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            provider_id: new.provider_id,
            title: new.title,
            category: new.category,
            description: new.description,
            price: new.price,
            image: new.image,
            rating: 0.0,
            review_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.services.lock().unwrap().push(service.clone());
        Ok(service)
    }

    async fn update(
        &self,
        id: i32,
        provider_id: i32,
        changes: ServiceUpdate,
    ) -> AppResult<Service> {
        let mut services = self.services.lock().unwrap();
        let service = services
            .iter_mut()
            .find(|s| s.id == id && s.provider_id == provider_id)
            .ok_or(AppError::NotFound)?;

        if let Some(title) = changes.title {
            service.title = title;
        }
        if let Some(category) = changes.category {
            service.category = category;
        }
        if let Some(description) = changes.description {
            service.description = description;
        }
        if let Some(price) = changes.price {
            service.price = price;
        }
        if let Some(image) = changes.image {
            service.image = Some(image);
        }
        if let Some(is_active) = changes.is_active {
            service.is_active = is_active;
        }
        service.updated_at = Utc::now();
        Ok(service.clone())
    }

    async fn set_active(&self, id: i32, provider_id: i32, active: bool) -> AppResult<Service> {
        let mut services = self.services.lock().unwrap();
        let service = services
            .iter_mut()
            .find(|s| s.id == id && s.provider_id == provider_id)
            .ok_or(AppError::NotFound)?;

        service.is_active = active;
        service.updated_at = Utc::now();
        Ok(service.clone())
    }
}

// =============================================================================
// Bookings
// =============================================================================

#[derive(Default)]
pub struct InMemoryBookings {
    bookings: Mutex<Vec<Booking>>,
    next_id: AtomicI32,
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn list_by_customer(
        &self,
        customer_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .filter(|b| status.map_or(true, |s| b.status == s))
            .cloned()
            .collect())
    }

    async fn list_by_provider(
        &self,
        provider_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.provider_id == provider_id)
            .filter(|b| status.map_or(true, |s| b.status == s))
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewBooking) -> AppResult<Booking> {
        let now = Utc::now();
        let booking = Booking {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            customer_id: new.customer_id,
            provider_id: new.provider_id,
            service_id: new.service_id,
            date: new.date,
            time: new.time,
            address: new.address,
            total_amount: new.total_amount,
            status: BookingStatus::Pending,
            payment_status: "pending".to_string(),
            created_at: now,
            updated_at: now,
        };
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn update_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(AppError::NotFound)?;

        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }
}

// =============================================================================
// Repository accessor
// =============================================================================

/// Fake `Repositories` implementation over the in-memory stores.
#[derive(Default)]
pub struct FakeRepos {
    pub user_repo: Arc<InMemoryUsers>,
    pub service_repo: Arc<InMemoryServices>,
    pub booking_repo: Arc<InMemoryBookings>,
}

impl Repositories for FakeRepos {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn services(&self) -> Arc<dyn ServiceRepository> {
        self.service_repo.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.booking_repo.clone()
    }
}
