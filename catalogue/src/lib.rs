//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

//! Directory listing, per-document tokenisation, and catalogue aggregation
//! (C7).

pub mod aggregate;
pub mod document;
pub mod listing;

pub use aggregate::{build_catalogue, CancellationToken, Catalogue};
pub use document::build_document;
pub use listing::list_directory;
