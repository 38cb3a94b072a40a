//! Ray queries against the physics world

use crate::layers::CollisionGroups;
use rapier3d::prelude as rapier;
use skulk_core::{EntityId, RayHit, RayQuery};

/// Borrowed query interface over a stepped world
pub struct PhysicsQuery<'a> {
    pub(crate) query_pipeline: &'a rapier::QueryPipeline,
    pub(crate) colliders: &'a rapier::ColliderSet,
    pub(crate) bodies: &'a rapier::RigidBodySet,
}

impl<'a> PhysicsQuery<'a> {
    /// Cast a ray and get the first hit.
    ///
    /// `exclude_body` drops every collider attached to that body, so a
    /// caster never sees its own capsule.
    pub fn raycast(
        &self,
        query: &RayQuery,
        exclude_body: Option<rapier::RigidBodyHandle>,
    ) -> Option<RayHit> {
        let direction = query.direction.try_normalize()?;
        if !query.origin.is_finite() || query.max_distance.is_nan() || query.max_distance <= 0.0 {
            return None;
        }

        let ray = rapier::Ray::new(
            rapier::Point::new(query.origin.x, query.origin.y, query.origin.z),
            rapier::Vector::new(direction.x, direction.y, direction.z),
        );

        let groups = CollisionGroups::query(query.filter.layers);
        let mut filter = rapier::QueryFilter::new()
            .groups(rapier::InteractionGroups::new(
                rapier::Group::from_bits_truncate(groups.memberships),
                rapier::Group::from_bits_truncate(groups.filter),
            ))
            .exclude_sensors();

        if query.filter.exclude_dynamic {
            filter.flags |= rapier::QueryFilterFlags::EXCLUDE_DYNAMIC;
        }
        if let Some(body) = exclude_body {
            filter = filter.exclude_rigid_body(body);
        }

        self.query_pipeline
            .cast_ray(
                self.bodies,
                self.colliders,
                &ray,
                query.max_distance,
                query.solid,
                filter,
            )
            .map(|(handle, toi)| {
                let entity = self
                    .colliders
                    .get(handle)
                    .map(|c| c.user_data)
                    .filter(|&data| data != 0)
                    .map(EntityId::from_user_data);

                RayHit {
                    distance: toi,
                    entity,
                }
            })
    }
}
