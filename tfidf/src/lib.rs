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

//! TF-IDF weighting (C8) and min-max normalisation (C9).

pub mod normalize;
pub mod project;
pub mod weight;

pub use normalize::{extrema, scale, unscale, Extrema};
pub use project::{project_document_major, project_in_place, project_term_major};
pub use weight::tfidf_weight;
