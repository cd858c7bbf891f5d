pub mod lifecycle_dto;
