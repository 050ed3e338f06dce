pub mod alien;
pub mod bullet;
pub mod ship;

pub use alien::Alien;
pub use bullet::Bullet;
pub use ship::Ship;
